//! Note slugs.
//!
//! A slug is a non-empty string of ASCII letters, digits, underscores and
//! hyphens. When a note is saved without one, it is derived from the title by
//! [`slugify`].

/// Maximum slug length, matching the title limit.
pub const SLUG_MAX_LENGTH: usize = 100;

/// Return `true` when `value` may be used as an explicit slug.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// Derive a URL-safe slug from arbitrary text.
///
/// Cyrillic letters are transliterated, anything else outside `[a-z0-9_-]`
/// is dropped, runs of whitespace and hyphens become a single hyphen, and
/// leading or trailing hyphens and underscores are removed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
            continue;
        }

        let mapped = match transliterate(ch) {
            Some(latin) => latin,
            None if ch.is_ascii_alphanumeric() || ch == '_' => {
                push_segment(&mut slug, &mut pending_hyphen, ch.encode_utf8(&mut [0; 4]));
                continue;
            }
            None => continue,
        };

        if !mapped.is_empty() {
            push_segment(&mut slug, &mut pending_hyphen, mapped);
        }
    }

    let trimmed = slug.trim_matches(|c| c == '-' || c == '_');
    // All remaining characters are ASCII, so byte slicing is safe
    let truncated = &trimmed[..trimmed.len().min(SLUG_MAX_LENGTH)];
    truncated.trim_end_matches(['-', '_']).to_string()
}

fn push_segment(slug: &mut String, pending_hyphen: &mut bool, segment: &str) {
    if *pending_hyphen && !slug.is_empty() {
        slug.push('-');
    }
    *pending_hyphen = false;
    slug.push_str(segment);
}

fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'ї' => "yi",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slugify_ascii_title() {
        assert_eq!(slugify("Anonymus"), "anonymus");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("snake_case-and--dashes"), "snake_case-and-dashes");
    }

    #[test]
    fn test_slugify_transliterates_cyrillic() {
        assert_eq!(slugify("Заголовок"), "zagolovok");
        assert_eq!(slugify("Лев Толстой"), "lev-tolstoj");
        assert_eq!(slugify("Щука и ёж"), "schuka-i-yozh");
        assert_eq!(slugify("Объявление"), "obyavlenie");
    }

    #[test]
    fn test_slugify_strips_edges() {
        assert_eq!(slugify("--_hello_--"), "hello");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(150);
        assert_eq!(slugify(&long).len(), SLUG_MAX_LENGTH);

        let edge = format!("{} b", "a".repeat(99));
        assert_eq!(slugify(&edge), "a".repeat(99));
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("my-note_1"));
        assert!(is_valid_slug("ABC"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("заметка"));
        assert!(!is_valid_slug("a/b"));
    }

    proptest! {
        #[test]
        fn prop_slugify_output_is_valid_or_empty(input in "\\PC{0,200}") {
            let slug = slugify(&input);
            prop_assert!(slug.len() <= SLUG_MAX_LENGTH);
            prop_assert!(slug.is_empty() || is_valid_slug(&slug));
            prop_assert!(!slug.chars().any(|c| c.is_ascii_uppercase()));
        }

        #[test]
        fn prop_slugify_is_idempotent(input in "\\PC{0,200}") {
            let once = slugify(&input);
            prop_assert_eq!(slugify(&once), once.clone());
        }

        #[test]
        fn prop_slugify_keeps_no_edge_separators(input in "[ a-zA-Zа-я_-]{0,60}") {
            let slug = slugify(&input);
            prop_assert!(!slug.starts_with(['-', '_']));
            prop_assert!(!slug.ends_with(['-', '_']));
            prop_assert!(!slug.contains("--"));
        }
    }
}

//! Central configuration for the owned_content crate

use std::sync::LazyLock;

/// Number of news items shown on the home page
/// Default: 10
pub static NEWS_COUNT_ON_HOME_PAGE: LazyLock<usize> = LazyLock::new(|| {
    parse_news_count(std::env::var("NEWS_COUNT_ON_HOME_PAGE").ok().as_deref())
});

/// Substrings that may not appear in comment text (case-insensitive)
/// Default: "редиска,негодяй"
pub static COMMENT_BAD_WORDS: LazyLock<Vec<String>> =
    LazyLock::new(|| parse_bad_words(std::env::var("COMMENT_BAD_WORDS").ok().as_deref()));

const DEFAULT_NEWS_COUNT: usize = 10;
const DEFAULT_BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];

fn parse_news_count(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_NEWS_COUNT)
}

fn parse_bad_words(value: Option<&str>) -> Vec<String> {
    let words: Vec<String> = match value {
        Some(list) => list
            .split(',')
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect(),
        None => Vec::new(),
    };

    if words.is_empty() {
        DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect()
    } else {
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_count_default() {
        assert_eq!(parse_news_count(None), 10);
    }

    #[test]
    fn test_news_count_custom() {
        assert_eq!(parse_news_count(Some("25")), 25);
        assert_eq!(parse_news_count(Some(" 3 ")), 3);
    }

    #[test]
    fn test_news_count_invalid_falls_back() {
        assert_eq!(parse_news_count(Some("many")), 10);
        assert_eq!(parse_news_count(Some("0")), 10);
        assert_eq!(parse_news_count(Some("-4")), 10);
    }

    #[test]
    fn test_bad_words_default() {
        assert_eq!(parse_bad_words(None), vec!["редиска", "негодяй"]);
    }

    #[test]
    fn test_bad_words_custom_list_is_lowercased_and_trimmed() {
        assert_eq!(
            parse_bad_words(Some(" Scoundrel , RADISH,,")),
            vec!["scoundrel", "radish"]
        );
    }

    #[test]
    fn test_bad_words_empty_list_falls_back() {
        assert_eq!(parse_bad_words(Some(" , ,")), vec!["редиска", "негодяй"]);
    }
}

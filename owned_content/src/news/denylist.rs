//! Forbidden words in comments.

/// Case-insensitive substring match against the denylist.
///
/// `words` are expected in lowercase, as `COMMENT_BAD_WORDS` provides them.
pub fn contains_forbidden_word(text: &str, words: &[String]) -> bool {
    let text = text.to_lowercase();
    words
        .iter()
        .filter(|word| !word.is_empty())
        .any(|word| text.contains(word.as_str()))
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::news::denylist::contains_forbidden_word;
use crate::policy::{Owned, Visibility};
use crate::validation::{FormErrors, ValidationError};

pub const NEWS_TITLE_MAX_LENGTH: usize = 50;

/// A public news item. News are not owned by users.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    /// User id of the author, fixed at creation
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Owned for Comment {
    const VISIBILITY: Visibility = Visibility::Public;

    fn owner(&self) -> &str {
        &self.author
    }
}

/// A comment together with its author's username, for display
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct CommentView {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub author_username: String,
}

impl Owned for CommentView {
    const VISIBILITY: Visibility = Comment::VISIBILITY;

    fn owner(&self) -> &str {
        self.comment.owner()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
        }
    }

    /// Returns the text to store, or the errors on the `text` field.
    pub(crate) fn validate(&self, forbidden: &[String]) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        errors.check_text("text", &self.text, None);
        if errors.is_empty() && contains_forbidden_word(&self.text, forbidden) {
            errors.push(ValidationError::ForbiddenContent);
        }

        errors.into_result()?;
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_words() -> Vec<String> {
        vec!["редиска".to_string()]
    }

    #[test]
    fn test_validate_ok() {
        let form = CommentForm {
            text: "Текст комментария".to_string(),
        };
        assert_eq!(form.validate(&bad_words()).unwrap(), "Текст комментария");
    }

    #[test]
    fn test_validate_forbidden_word() {
        let form = CommentForm {
            text: "Какой-то текст, редиска, еще текст".to_string(),
        };
        let errors = form.validate(&bad_words()).unwrap_err();

        assert_eq!(errors.errors(), &[ValidationError::ForbiddenContent]);
        assert_eq!(
            errors.for_field("text"),
            vec!["Please don't use offensive language!".to_string()]
        );
    }

    #[test]
    fn test_validate_empty_text() {
        let errors = CommentForm::default().validate(&bad_words()).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[ValidationError::Required { field: "text" }]
        );
    }

    #[test]
    fn test_comment_is_public() {
        assert_eq!(Comment::VISIBILITY, Visibility::Public);
    }
}

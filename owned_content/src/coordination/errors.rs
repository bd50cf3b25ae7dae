//! Error types for content operations

use thiserror::Error;

use crate::news::NewsError;
use crate::notes::NoteError;
use crate::policy::Denial;
use crate::session::SessionError;
use crate::userdb::UserError;
use crate::utils::UtilError;
use crate::validation::{FormErrors, ValidationError};

/// Errors returned by the content operations
#[derive(Error, Debug)]
pub enum ContentError {
    /// The caller must log in first
    #[error("Authentication required")]
    Unauthenticated,

    /// Missing, or owned by somebody else
    #[error("Resource not found: {resource_type} {resource_id}")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    /// The submitted form is invalid. Nothing was written.
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    /// Database or cache failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error from the user database operations
    #[error("User error: {0}")]
    User(UserError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    Session(SessionError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(UtilError),
}

impl ContentError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Unauthenticated => tracing::debug!("Authentication required"),
            Self::NotFound {
                resource_type,
                resource_id,
            } => tracing::debug!("Resource not found: {} {}", resource_type, resource_id),
            Self::Validation(errors) => tracing::debug!("Validation failed: {}", errors),
            Self::Storage(msg) => tracing::error!("Storage error: {}", msg),
            Self::User(err) => tracing::error!("User error: {}", err),
            Self::Session(err) => tracing::error!("Session error: {}", err),
            Self::Utils(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }

    pub(crate) fn not_found(resource_type: &str, resource_id: impl ToString) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
        }
    }

    /// Translate a policy denial on a concrete resource
    pub(crate) fn denied(denial: Denial, resource_type: &str, resource_id: impl ToString) -> Self {
        match denial {
            Denial::Unauthenticated => Self::Unauthenticated,
            Denial::NotFound => Self::not_found(resource_type, resource_id),
        }
    }

    /// The form errors, if this is a validation failure
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FormErrors> for ContentError {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<ValidationError> for ContentError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(FormErrors::from(error))
    }
}

impl From<NoteError> for ContentError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound => Self::not_found("Note", ""),
            NoteError::DuplicateSlug(slug) => ValidationError::DuplicateSlug { slug }.into(),
            NoteError::Storage(msg) => Self::Storage(msg).log(),
        }
    }
}

impl From<NewsError> for ContentError {
    fn from(err: NewsError) -> Self {
        match err {
            NewsError::NewsNotFound => Self::not_found("News", ""),
            NewsError::CommentNotFound => Self::not_found("Comment", ""),
            NewsError::TitleTooLong(max) => ValidationError::TooLong {
                field: "title",
                max,
            }
            .into(),
            NewsError::Storage(msg) => Self::Storage(msg).log(),
        }
    }
}

// Custom From implementations that automatically log errors

impl From<UserError> for ContentError {
    fn from(err: UserError) -> Self {
        let error = Self::User(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for ContentError {
    fn from(err: SessionError) -> Self {
        let error = Self::Session(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for ContentError {
    fn from(err: UtilError) -> Self {
        let error = Self::Utils(err);
        tracing::error!("{}", error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<ContentError>();
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ContentError::Unauthenticated.to_string(),
            "Authentication required"
        );
        assert_eq!(
            ContentError::not_found("Note", "my-slug").to_string(),
            "Resource not found: Note my-slug"
        );
        assert_eq!(
            ContentError::Storage("disk full".to_string()).to_string(),
            "Storage error: disk full"
        );
    }

    #[test]
    fn test_denied_maps_policy_denials() {
        assert!(matches!(
            ContentError::denied(Denial::Unauthenticated, "Note", "x"),
            ContentError::Unauthenticated
        ));
        match ContentError::denied(Denial::NotFound, "Comment", 3) {
            ContentError::NotFound {
                resource_type,
                resource_id,
            } => {
                assert_eq!(resource_type, "Comment");
                assert_eq!(resource_id, "3");
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_slug_becomes_validation_error() {
        let err = ContentError::from(NoteError::DuplicateSlug("taken".to_string()));
        let errors = err.form_errors().expect("validation error");

        assert_eq!(
            errors.for_field("slug"),
            vec!["taken - this slug already exists, choose a unique value!".to_string()]
        );
    }

    #[test]
    fn test_from_news_error() {
        assert!(matches!(
            ContentError::from(NewsError::CommentNotFound),
            ContentError::NotFound { .. }
        ));
        assert!(matches!(
            ContentError::from(NewsError::Storage("x".to_string())),
            ContentError::Storage(_)
        ));
    }

    #[test]
    fn test_from_user_error() {
        let err: ContentError = UserError::Storage("user db error".to_string()).into();

        if let ContentError::User(UserError::Storage(msg)) = err {
            assert_eq!(msg, "user db error");
        } else {
            panic!("Wrong error type");
        }
    }

    #[test]
    fn test_error_log_returns_self() {
        let err = ContentError::Storage("test error".to_string()).log();

        if let ContentError::Storage(msg) = err {
            assert_eq!(msg, "test error");
        } else {
            panic!("Wrong error type after logging");
        }
    }
}

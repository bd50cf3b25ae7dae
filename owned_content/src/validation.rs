//! Form validation errors, attached to the field they concern.

use thiserror::Error;

/// Field name used for errors that concern the form as a whole
pub const NON_FIELD: &str = "__all__";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required { field: &'static str },

    #[error("Ensure this value has at most {max} characters.")]
    TooLong { field: &'static str, max: usize },

    #[error("Enter a valid slug consisting of letters, numbers, underscores or hyphens.")]
    InvalidSlug,

    #[error("{slug} - this slug already exists, choose a unique value!")]
    DuplicateSlug { slug: String },

    #[error("Please don't use offensive language!")]
    ForbiddenContent,

    #[error("Enter a valid username of letters, digits and @/./+/-/_ only.")]
    InvalidUsername,

    #[error("A user with that username already exists.")]
    UsernameTaken,

    #[error("The two password fields didn't match.")]
    PasswordMismatch,

    #[error("Please enter a correct username and password.")]
    InvalidCredentials,
}

impl ValidationError {
    /// The form field this error is reported on
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::TooLong { field, .. } => field,
            Self::InvalidSlug | Self::DuplicateSlug { .. } => "slug",
            Self::ForbiddenContent => "text",
            Self::InvalidUsername | Self::UsernameTaken => "username",
            Self::PasswordMismatch => "password2",
            Self::InvalidCredentials => NON_FIELD,
        }
    }
}

/// All errors found while validating one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<ValidationError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Rendered messages for one field, in the order they were found
    pub fn for_field(&self, field: &str) -> Vec<String> {
        self.errors
            .iter()
            .filter(|e| e.field() == field)
            .map(ToString::to_string)
            .collect()
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Check a required text field, recording `Required` or `TooLong`.
    pub(crate) fn check_text(&mut self, field: &'static str, value: &str, max: Option<usize>) {
        if value.trim().is_empty() {
            self.push(ValidationError::Required { field });
            return;
        }
        match max {
            Some(max) if value.chars().count() > max => {
                self.push(ValidationError::TooLong { field, max });
            }
            _ => {}
        }
    }
}

impl From<ValidationError> for FormErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field(), e))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

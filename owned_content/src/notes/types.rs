use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::notes::slug::{SLUG_MAX_LENGTH, is_valid_slug, slugify};
use crate::policy::{Owned, Visibility};
use crate::validation::{FormErrors, ValidationError};

pub const NOTE_TITLE_MAX_LENGTH: usize = 100;

/// A private note, addressed by its globally unique slug
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    /// User id of the author, fixed at creation
    pub author: String,
}

impl Owned for Note {
    const VISIBILITY: Visibility = Visibility::Private;

    fn owner(&self) -> &str {
        &self.author
    }
}

/// Submitted note fields. An empty slug means "derive it from the title".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Validated fields ready to be written
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NoteFields {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) slug: String,
}

impl NoteForm {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: Some(note.slug.clone()),
        }
    }

    /// The slug to store: the submitted one, or one derived from the title.
    pub fn effective_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.title),
        }
    }

    /// Check everything that does not need the database.
    pub(crate) fn validate(&self) -> Result<NoteFields, FormErrors> {
        let mut errors = FormErrors::new();
        errors.check_text("title", &self.title, Some(NOTE_TITLE_MAX_LENGTH));
        errors.check_text("text", &self.text, None);

        let slug = self.effective_slug();
        if slug.chars().count() > SLUG_MAX_LENGTH {
            errors.push(ValidationError::TooLong {
                field: "slug",
                max: SLUG_MAX_LENGTH,
            });
        } else if !errors.has("title") && !is_valid_slug(&slug) {
            errors.push(ValidationError::InvalidSlug);
        }

        errors.into_result()?;
        Ok(NoteFields {
            title: self.title.clone(),
            text: self.text.clone(),
            slug,
        })
    }
}

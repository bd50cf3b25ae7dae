use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NoteError {
    #[error("Note not found")]
    NotFound,

    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for NoteError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Map a failed write to `DuplicateSlug` when the UNIQUE constraint fired
pub(super) fn map_write_error(err: sqlx::Error, slug: &str) -> NoteError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        NoteError::DuplicateSlug(slug.to_string())
    } else {
        NoteError::from(err)
    }
}

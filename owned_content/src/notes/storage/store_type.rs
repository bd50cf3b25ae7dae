use crate::notes::errors::NoteError;
use crate::notes::types::{Note, NoteFields};
use crate::storage::Stores;

use super::postgres::*;
use super::sqlite::*;

/// Persistence for notes. Authorization is not checked here.
pub struct NoteStore;

impl NoteStore {
    pub(crate) async fn init(stores: &Stores) -> Result<(), NoteError> {
        let store = stores.data();

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_note_tables_sqlite(pool).await
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_note_tables_postgres(pool).await
            }
            _ => Err(NoteError::Storage("Unsupported database type".to_string())),
        }
    }

    #[tracing::instrument(skip(stores))]
    pub async fn get_by_slug(stores: &Stores, slug: &str) -> Result<Option<Note>, NoteError> {
        let store = stores.data();

        if let Some(pool) = store.as_sqlite() {
            get_note_by_slug_sqlite(pool, slug).await
        } else if let Some(pool) = store.as_postgres() {
            get_note_by_slug_postgres(pool, slug).await
        } else {
            Err(NoteError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Whether another note already uses `slug`. `exclude_id` is the note
    /// being edited, whose own slug does not count.
    pub(crate) async fn slug_taken(
        stores: &Stores,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, NoteError> {
        let store = stores.data();

        if let Some(pool) = store.as_sqlite() {
            slug_taken_sqlite(pool, slug, exclude_id).await
        } else if let Some(pool) = store.as_postgres() {
            slug_taken_postgres(pool, slug, exclude_id).await
        } else {
            Err(NoteError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument(skip(stores))]
    pub async fn list_by_author(stores: &Stores, author: &str) -> Result<Vec<Note>, NoteError> {
        let store = stores.data();

        if let Some(pool) = store.as_sqlite() {
            list_notes_by_author_sqlite(pool, author).await
        } else if let Some(pool) = store.as_postgres() {
            list_notes_by_author_postgres(pool, author).await
        } else {
            Err(NoteError::Storage("Unsupported database type".to_string()))
        }
    }

    pub async fn list_all(stores: &Stores) -> Result<Vec<Note>, NoteError> {
        let store = stores.data();

        if let Some(pool) = store.as_sqlite() {
            list_all_notes_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            list_all_notes_postgres(pool).await
        } else {
            Err(NoteError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument(skip(stores, fields), fields(slug = %fields.slug))]
    pub(crate) async fn create(
        stores: &Stores,
        author: &str,
        fields: NoteFields,
    ) -> Result<Note, NoteError> {
        let store = stores.data();

        let result = if let Some(pool) = store.as_sqlite() {
            insert_note_sqlite(pool, author, fields).await
        } else if let Some(pool) = store.as_postgres() {
            insert_note_postgres(pool, author, fields).await
        } else {
            Err(NoteError::Storage("Unsupported database type".to_string()))
        };

        if let Ok(note) = &result {
            tracing::info!(note_id = note.id, "Note created");
        }
        result
    }

    /// Overwrite title, text and slug. The author column is never written.
    #[tracing::instrument(skip(stores, fields), fields(slug = %fields.slug))]
    pub(crate) async fn update(
        stores: &Stores,
        id: i64,
        fields: NoteFields,
    ) -> Result<Note, NoteError> {
        let store = stores.data();

        if let Some(pool) = store.as_sqlite() {
            update_note_sqlite(pool, id, fields).await
        } else if let Some(pool) = store.as_postgres() {
            update_note_postgres(pool, id, fields).await
        } else {
            Err(NoteError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument(skip(stores))]
    pub(crate) async fn delete(stores: &Stores, id: i64) -> Result<(), NoteError> {
        let store = stores.data();

        if let Some(pool) = store.as_sqlite() {
            delete_note_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_note_postgres(pool, id).await
        } else {
            Err(NoteError::Storage("Unsupported database type".to_string()))
        }
    }
}

use sqlx::{Pool, Postgres};

use crate::notes::errors::{NoteError, map_write_error};
use crate::notes::types::{Note, NoteFields};
use crate::storage::validate_postgres_table_schema;

use super::config::DB_TABLE_NOTES;

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            author TEXT NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table_name}_author ON {table_name}(author)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_note_tables_postgres(pool: &Pool<Postgres>) -> Result<(), NoteError> {
    let expected_columns = [
        ("id", "bigint"),
        ("title", "text"),
        ("text", "text"),
        ("slug", "text"),
        ("author", "text"),
    ];

    validate_postgres_table_schema(
        pool,
        DB_TABLE_NOTES.as_str(),
        &expected_columns,
        NoteError::Storage,
    )
    .await
}

pub(super) async fn get_note_by_slug_postgres(
    pool: &Pool<Postgres>,
    slug: &str,
) -> Result<Option<Note>, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let note = sqlx::query_as::<_, Note>(&format!("SELECT * FROM {table_name} WHERE slug = $1"))
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(note)
}

pub(super) async fn slug_taken_postgres(
    pool: &Pool<Postgres>,
    slug: &str,
    exclude_id: Option<i64>,
) -> Result<bool, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let taken: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS(SELECT 1 FROM {table_name} WHERE slug = $1 AND ($2::BIGINT IS NULL OR id != $2))"
    ))
    .bind(slug)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;

    Ok(taken)
}

pub(super) async fn list_notes_by_author_postgres(
    pool: &Pool<Postgres>,
    author: &str,
) -> Result<Vec<Note>, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let notes = sqlx::query_as::<_, Note>(&format!(
        "SELECT * FROM {table_name} WHERE author = $1 ORDER BY id ASC"
    ))
    .bind(author)
    .fetch_all(pool)
    .await?;

    Ok(notes)
}

pub(super) async fn list_all_notes_postgres(pool: &Pool<Postgres>) -> Result<Vec<Note>, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let notes = sqlx::query_as::<_, Note>(&format!("SELECT * FROM {table_name} ORDER BY id ASC"))
        .fetch_all(pool)
        .await?;

    Ok(notes)
}

pub(super) async fn insert_note_postgres(
    pool: &Pool<Postgres>,
    author: &str,
    fields: NoteFields,
) -> Result<Note, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    sqlx::query_as::<_, Note>(&format!(
        "INSERT INTO {table_name} (title, text, slug, author) VALUES ($1, $2, $3, $4) RETURNING *"
    ))
    .bind(&fields.title)
    .bind(&fields.text)
    .bind(&fields.slug)
    .bind(author)
    .fetch_one(pool)
    .await
    .map_err(|e| map_write_error(e, &fields.slug))
}

pub(super) async fn update_note_postgres(
    pool: &Pool<Postgres>,
    id: i64,
    fields: NoteFields,
) -> Result<Note, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    sqlx::query_as::<_, Note>(&format!(
        "UPDATE {table_name} SET title = $1, text = $2, slug = $3 WHERE id = $4 RETURNING *"
    ))
    .bind(&fields.title)
    .bind(&fields.text)
    .bind(&fields.slug)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_write_error(e, &fields.slug))?
    .ok_or(NoteError::NotFound)
}

pub(super) async fn delete_note_postgres(pool: &Pool<Postgres>, id: i64) -> Result<(), NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = $1"))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(NoteError::NotFound);
    }
    Ok(())
}

use sqlx::{Pool, Sqlite};

use crate::notes::errors::{NoteError, map_write_error};
use crate::notes::types::{Note, NoteFields};
use crate::storage::validate_sqlite_table_schema;

use super::config::DB_TABLE_NOTES;

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
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

pub(super) async fn validate_note_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), NoteError> {
    let expected_columns = [
        ("id", "INTEGER"),
        ("title", "TEXT"),
        ("text", "TEXT"),
        ("slug", "TEXT"),
        ("author", "TEXT"),
    ];

    validate_sqlite_table_schema(
        pool,
        DB_TABLE_NOTES.as_str(),
        &expected_columns,
        NoteError::Storage,
    )
    .await
}

pub(super) async fn get_note_by_slug_sqlite(
    pool: &Pool<Sqlite>,
    slug: &str,
) -> Result<Option<Note>, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let note = sqlx::query_as::<_, Note>(&format!("SELECT * FROM {table_name} WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(note)
}

pub(super) async fn slug_taken_sqlite(
    pool: &Pool<Sqlite>,
    slug: &str,
    exclude_id: Option<i64>,
) -> Result<bool, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let taken: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS(SELECT 1 FROM {table_name} WHERE slug = ? AND (? IS NULL OR id != ?))"
    ))
    .bind(slug)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;

    Ok(taken)
}

pub(super) async fn list_notes_by_author_sqlite(
    pool: &Pool<Sqlite>,
    author: &str,
) -> Result<Vec<Note>, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let notes = sqlx::query_as::<_, Note>(&format!(
        "SELECT * FROM {table_name} WHERE author = ? ORDER BY id ASC"
    ))
    .bind(author)
    .fetch_all(pool)
    .await?;

    Ok(notes)
}

pub(super) async fn list_all_notes_sqlite(pool: &Pool<Sqlite>) -> Result<Vec<Note>, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let notes = sqlx::query_as::<_, Note>(&format!("SELECT * FROM {table_name} ORDER BY id ASC"))
        .fetch_all(pool)
        .await?;

    Ok(notes)
}

pub(super) async fn insert_note_sqlite(
    pool: &Pool<Sqlite>,
    author: &str,
    fields: NoteFields,
) -> Result<Note, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let result = sqlx::query(&format!(
        "INSERT INTO {table_name} (title, text, slug, author) VALUES (?, ?, ?, ?)"
    ))
    .bind(&fields.title)
    .bind(&fields.text)
    .bind(&fields.slug)
    .bind(author)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &fields.slug))?;

    Ok(Note {
        id: result.last_insert_rowid(),
        title: fields.title,
        text: fields.text,
        slug: fields.slug,
        author: author.to_string(),
    })
}

pub(super) async fn update_note_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
    fields: NoteFields,
) -> Result<Note, NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    sqlx::query_as::<_, Note>(&format!(
        "UPDATE {table_name} SET title = ?, text = ?, slug = ? WHERE id = ? RETURNING *"
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

pub(super) async fn delete_note_sqlite(pool: &Pool<Sqlite>, id: i64) -> Result<(), NoteError> {
    let table_name = DB_TABLE_NOTES.as_str();

    let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(NoteError::NotFound);
    }
    Ok(())
}

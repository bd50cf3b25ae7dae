use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::news::errors::NewsError;
use crate::news::types::{Comment, CommentView, News};
use crate::storage::validate_postgres_table_schema;
use crate::userdb::DB_TABLE_USERS;

use super::config::{DB_TABLE_COMMENTS, DB_TABLE_NEWS};

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), NewsError> {
    let news_table = DB_TABLE_NEWS.as_str();
    let comments_table = DB_TABLE_COMMENTS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {news_table} (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            date DATE NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {comments_table} (
            id BIGSERIAL PRIMARY KEY,
            news_id BIGINT NOT NULL REFERENCES {news_table}(id) ON DELETE CASCADE,
            author TEXT NOT NULL,
            text TEXT NOT NULL,
            created TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{comments_table}_news ON {comments_table}(news_id, created)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_news_tables_postgres(pool: &Pool<Postgres>) -> Result<(), NewsError> {
    let news_columns = [
        ("id", "bigint"),
        ("title", "text"),
        ("text", "text"),
        ("date", "date"),
    ];
    validate_postgres_table_schema(
        pool,
        DB_TABLE_NEWS.as_str(),
        &news_columns,
        NewsError::Storage,
    )
    .await?;

    let comment_columns = [
        ("id", "bigint"),
        ("news_id", "bigint"),
        ("author", "text"),
        ("text", "text"),
        ("created", "timestamp with time zone"),
    ];
    validate_postgres_table_schema(
        pool,
        DB_TABLE_COMMENTS.as_str(),
        &comment_columns,
        NewsError::Storage,
    )
    .await
}

pub(super) async fn insert_news_postgres(
    pool: &Pool<Postgres>,
    title: &str,
    text: &str,
    date: NaiveDate,
) -> Result<News, NewsError> {
    let table_name = DB_TABLE_NEWS.as_str();

    let news = sqlx::query_as::<_, News>(&format!(
        "INSERT INTO {table_name} (title, text, date) VALUES ($1, $2, $3) RETURNING *"
    ))
    .bind(title)
    .bind(text)
    .bind(date)
    .fetch_one(pool)
    .await?;

    Ok(news)
}

pub(super) async fn list_latest_news_postgres(
    pool: &Pool<Postgres>,
    limit: i64,
) -> Result<Vec<News>, NewsError> {
    let table_name = DB_TABLE_NEWS.as_str();

    let news = sqlx::query_as::<_, News>(&format!(
        "SELECT * FROM {table_name} ORDER BY date DESC, id DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(news)
}

pub(super) async fn get_news_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<News>, NewsError> {
    let table_name = DB_TABLE_NEWS.as_str();

    let news = sqlx::query_as::<_, News>(&format!("SELECT * FROM {table_name} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(news)
}

pub(super) async fn list_comments_postgres(
    pool: &Pool<Postgres>,
    news_id: i64,
) -> Result<Vec<CommentView>, NewsError> {
    let comments_table = DB_TABLE_COMMENTS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    let comments = sqlx::query_as::<_, CommentView>(&format!(
        r#"
        SELECT c.*, COALESCE(u.username, '') AS author_username
        FROM {comments_table} c
        LEFT JOIN {users_table} u ON u.id = c.author
        WHERE c.news_id = $1
        ORDER BY c.created ASC, c.id ASC
        "#
    ))
    .bind(news_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

pub(super) async fn get_comment_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<Comment>, NewsError> {
    let table_name = DB_TABLE_COMMENTS.as_str();

    let comment = sqlx::query_as::<_, Comment>(&format!("SELECT * FROM {table_name} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(comment)
}

pub(super) async fn insert_comment_postgres(
    pool: &Pool<Postgres>,
    news_id: i64,
    author: &str,
    text: &str,
    created: DateTime<Utc>,
) -> Result<Comment, NewsError> {
    let table_name = DB_TABLE_COMMENTS.as_str();

    let comment = sqlx::query_as::<_, Comment>(&format!(
        "INSERT INTO {table_name} (news_id, author, text, created) VALUES ($1, $2, $3, $4) RETURNING *"
    ))
    .bind(news_id)
    .bind(author)
    .bind(text)
    .bind(created)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

pub(super) async fn update_comment_text_postgres(
    pool: &Pool<Postgres>,
    id: i64,
    text: &str,
) -> Result<Comment, NewsError> {
    let table_name = DB_TABLE_COMMENTS.as_str();

    sqlx::query_as::<_, Comment>(&format!(
        "UPDATE {table_name} SET text = $1 WHERE id = $2 RETURNING *"
    ))
    .bind(text)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(NewsError::CommentNotFound)
}

pub(super) async fn delete_comment_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<(), NewsError> {
    let table_name = DB_TABLE_COMMENTS.as_str();

    let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = $1"))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(NewsError::CommentNotFound);
    }
    Ok(())
}

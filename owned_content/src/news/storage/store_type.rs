use chrono::{DateTime, NaiveDate, Utc};

use crate::news::errors::NewsError;
use crate::news::types::{Comment, CommentView, NEWS_TITLE_MAX_LENGTH, News};
use crate::storage::Stores;

use super::postgres::*;
use super::sqlite::*;

/// Persistence for news and their comment threads
pub struct NewsStore;

macro_rules! dispatch {
    ($stores:expr, $sqlite:ident, $postgres:ident $(, $arg:expr)*) => {{
        let store = $stores.data();
        if let Some(pool) = store.as_sqlite() {
            $sqlite(pool $(, $arg)*).await
        } else if let Some(pool) = store.as_postgres() {
            $postgres(pool $(, $arg)*).await
        } else {
            Err(NewsError::Storage("Unsupported database type".to_string()))
        }
    }};
}

impl NewsStore {
    pub(crate) async fn init(stores: &Stores) -> Result<(), NewsError> {
        let store = stores.data();

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_news_tables_sqlite(pool).await
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_news_tables_postgres(pool).await
            }
            _ => Err(NewsError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Publish a news item. There is no per-user ownership for news.
    #[tracing::instrument(skip(stores, text))]
    pub async fn create_news(
        stores: &Stores,
        title: &str,
        text: &str,
        date: NaiveDate,
    ) -> Result<News, NewsError> {
        if title.chars().count() > NEWS_TITLE_MAX_LENGTH {
            return Err(NewsError::TitleTooLong(NEWS_TITLE_MAX_LENGTH));
        }
        dispatch!(stores, insert_news_sqlite, insert_news_postgres, title, text, date)
    }

    /// Newest first by date, then by id
    pub async fn latest_news(stores: &Stores, limit: usize) -> Result<Vec<News>, NewsError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        dispatch!(stores, list_latest_news_sqlite, list_latest_news_postgres, limit)
    }

    pub async fn get_news(stores: &Stores, id: i64) -> Result<Option<News>, NewsError> {
        dispatch!(stores, get_news_sqlite, get_news_postgres, id)
    }

    /// Comments of one news item, oldest first
    pub async fn list_comments(
        stores: &Stores,
        news_id: i64,
    ) -> Result<Vec<CommentView>, NewsError> {
        dispatch!(stores, list_comments_sqlite, list_comments_postgres, news_id)
    }

    pub async fn get_comment(stores: &Stores, id: i64) -> Result<Option<Comment>, NewsError> {
        dispatch!(stores, get_comment_sqlite, get_comment_postgres, id)
    }

    #[tracing::instrument(skip(stores, text))]
    pub(crate) async fn create_comment(
        stores: &Stores,
        news_id: i64,
        author: &str,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, NewsError> {
        let result = dispatch!(
            stores,
            insert_comment_sqlite,
            insert_comment_postgres,
            news_id,
            author,
            text,
            created
        );
        if let Ok(comment) = &result {
            tracing::info!(comment_id = comment.id, "Comment created");
        }
        result
    }

    /// Replace the text of a comment. Author, thread and timestamp stay as they are.
    #[tracing::instrument(skip(stores, text))]
    pub(crate) async fn update_comment_text(
        stores: &Stores,
        id: i64,
        text: &str,
    ) -> Result<Comment, NewsError> {
        dispatch!(
            stores,
            update_comment_text_sqlite,
            update_comment_text_postgres,
            id,
            text
        )
    }

    #[tracing::instrument(skip(stores))]
    pub(crate) async fn delete_comment(stores: &Stores, id: i64) -> Result<(), NewsError> {
        dispatch!(stores, delete_comment_sqlite, delete_comment_postgres, id)
    }
}

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NewsError {
    #[error("News not found")]
    NewsNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("News title is longer than {0} characters")]
    TitleTooLong(usize),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for NewsError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

use chrono::Utc;

use crate::config::{COMMENT_BAD_WORDS, NEWS_COUNT_ON_HOME_PAGE};
use crate::news::{Comment, CommentForm, CommentView, News, NewsStore};
use crate::policy::{AccessPolicy, Action, Identity};
use crate::storage::Stores;

use super::errors::ContentError;

const NEWS: &str = "News";
const COMMENT: &str = "Comment";

/// Everything the news detail page shows
#[derive(Debug, Clone)]
pub struct NewsDetail {
    pub news: News,
    /// Oldest first
    pub comments: Vec<CommentView>,
    /// Only authenticated callers are offered the comment form
    pub can_comment: bool,
}

/// The newest news for the home page, at most `NEWS_COUNT_ON_HOME_PAGE` of them
pub async fn home_news(stores: &Stores) -> Result<Vec<News>, ContentError> {
    Ok(NewsStore::latest_news(stores, *NEWS_COUNT_ON_HOME_PAGE).await?)
}

pub async fn news_detail(
    stores: &Stores,
    identity: &Identity,
    news_id: i64,
) -> Result<NewsDetail, ContentError> {
    let news = NewsStore::get_news(stores, news_id)
        .await?
        .ok_or_else(|| ContentError::not_found(NEWS, news_id))?;

    let comments = NewsStore::list_comments(stores, news_id).await?;

    Ok(NewsDetail {
        news,
        comments: AccessPolicy::visible(identity, comments),
        can_comment: AccessPolicy::check_create(identity).is_allowed(),
    })
}

/// Add a comment by the caller under `news_id`.
///
/// Text containing a forbidden word is rejected on the `text` field and
/// nothing is stored.
#[tracing::instrument(skip(stores, form))]
pub async fn add_comment(
    stores: &Stores,
    identity: &Identity,
    news_id: i64,
    form: &CommentForm,
) -> Result<Comment, ContentError> {
    AccessPolicy::check_create(identity)
        .into_result()
        .map_err(|denial| ContentError::denied(denial, COMMENT, ""))?;
    let Some(author) = identity.user_id() else {
        return Err(ContentError::Unauthenticated);
    };

    if NewsStore::get_news(stores, news_id).await?.is_none() {
        return Err(ContentError::not_found(NEWS, news_id));
    }

    let text = form.validate(&COMMENT_BAD_WORDS)?;
    Ok(NewsStore::create_comment(stores, news_id, author, &text, Utc::now()).await?)
}

/// Load a comment for its edit or delete page
pub async fn get_comment_for_edit(
    stores: &Stores,
    identity: &Identity,
    comment_id: i64,
) -> Result<Comment, ContentError> {
    load_comment(stores, identity, comment_id, Action::Edit).await
}

#[tracing::instrument(skip(stores, form))]
pub async fn edit_comment(
    stores: &Stores,
    identity: &Identity,
    comment_id: i64,
    form: &CommentForm,
) -> Result<Comment, ContentError> {
    let comment = load_comment(stores, identity, comment_id, Action::Edit).await?;

    let text = form.validate(&COMMENT_BAD_WORDS)?;
    Ok(NewsStore::update_comment_text(stores, comment.id, &text).await?)
}

/// Delete a comment and return it, so the caller knows which thread it was in
#[tracing::instrument(skip(stores))]
pub async fn delete_comment(
    stores: &Stores,
    identity: &Identity,
    comment_id: i64,
) -> Result<Comment, ContentError> {
    let comment = load_comment(stores, identity, comment_id, Action::Delete).await?;
    NewsStore::delete_comment(stores, comment.id).await?;
    Ok(comment)
}

async fn load_comment(
    stores: &Stores,
    identity: &Identity,
    comment_id: i64,
    action: Action,
) -> Result<Comment, ContentError> {
    if !identity.is_authenticated() {
        return Err(ContentError::Unauthenticated);
    }

    let comment = NewsStore::get_comment(stores, comment_id)
        .await?
        .ok_or_else(|| ContentError::not_found(COMMENT, comment_id))?;

    AccessPolicy::check(identity, &comment, action)
        .into_result()
        .map_err(|denial| ContentError::denied(denial, COMMENT, comment_id))?;

    Ok(comment)
}

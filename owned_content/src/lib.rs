//! owned-content - ownership-scoped content for small web applications
//!
//! This crate holds two kinds of user-owned content, private notes and public
//! news comments, together with the users, sessions and access policy that
//! decide who may read or change them. Web frameworks integrate through the
//! functions re-exported here; see `owned-content-axum` for the axum layer.

mod config;
mod coordination;
mod news;
mod notes;
mod policy;
mod session;
mod storage;
mod userdb;
mod utils;
mod validation;

#[cfg(test)]
mod test_utils;

pub use config::{COMMENT_BAD_WORDS, NEWS_COUNT_ON_HOME_PAGE};

pub use coordination::{
    ContentError, LoginForm, NewsDetail, SignupForm, USERNAME_MAX_LENGTH, add_comment,
    authenticate_user, create_note, delete_comment, delete_note, edit_comment,
    get_comment_for_edit, get_note, get_note_for_edit, get_user, home_news, list_notes,
    news_detail, register_user, update_note,
};

pub use news::{
    Comment, CommentForm, CommentView, NEWS_TITLE_MAX_LENGTH, News, NewsError, NewsStore,
    contains_forbidden_word,
};
pub use notes::{
    NOTE_TITLE_MAX_LENGTH, Note, NoteError, NoteForm, NoteStore, SLUG_MAX_LENGTH, is_valid_slug,
    slugify,
};

pub use policy::{AccessPolicy, Action, Decision, Denial, Identity, Owned, Visibility};

pub use session::{
    CsrfToken, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SessionError, User as SessionUser,
    csrf_matches, get_session_id_from_headers, get_user_and_csrf_token_from_session,
    new_session_header, prepare_logout_response,
};

pub use storage::{StorageError, Stores};
pub use userdb::{User, UserError};
pub use validation::{FormErrors, NON_FIELD, ValidationError};

/// Create or validate every table the crate uses
pub async fn init(stores: &Stores) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    userdb::init(stores).await?;
    notes::init(stores).await?;
    news::init(stores).await?;
    Ok(())
}

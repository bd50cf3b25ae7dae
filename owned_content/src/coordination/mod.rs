//! Content operations
//!
//! Every function here takes the caller's [`Identity`](crate::Identity),
//! consults the access policy, validates input and only then touches the
//! stores. Web handlers call these and never the stores directly.

mod errors;
mod news;
mod notes;
mod user;

pub use errors::ContentError;
pub use news::{
    NewsDetail, add_comment, delete_comment, edit_comment, get_comment_for_edit, home_news,
    news_detail,
};
pub use notes::{create_note, delete_note, get_note, get_note_for_edit, list_notes, update_note};
pub use user::{
    LoginForm, SignupForm, USERNAME_MAX_LENGTH, authenticate_user, get_user, register_user,
};

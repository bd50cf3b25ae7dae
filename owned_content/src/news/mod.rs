mod denylist;
mod errors;
mod storage;
mod types;

pub use denylist::contains_forbidden_word;
pub use errors::NewsError;
pub use storage::NewsStore;
pub use types::{Comment, CommentForm, CommentView, NEWS_TITLE_MAX_LENGTH, News};

use crate::storage::Stores;

pub(crate) async fn init(stores: &Stores) -> Result<(), NewsError> {
    NewsStore::init(stores).await
}

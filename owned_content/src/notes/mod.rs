mod errors;
mod slug;
mod storage;
mod types;

pub use errors::NoteError;
pub use slug::{SLUG_MAX_LENGTH, is_valid_slug, slugify};
pub use types::{NOTE_TITLE_MAX_LENGTH, Note, NoteForm};

pub use storage::NoteStore;

use crate::storage::Stores;

pub(crate) async fn init(stores: &Stores) -> Result<(), NoteError> {
    NoteStore::init(stores).await
}

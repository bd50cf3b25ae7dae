mod errors;
mod password;
mod storage;
mod types;

pub use errors::UserError;
pub use types::{User, UserSearchField};

pub(crate) use password::{hash_password, verify_password};
pub(crate) use storage::{DB_TABLE_USERS, UserStore};

use crate::storage::Stores;

pub(crate) async fn init(stores: &Stores) -> Result<(), UserError> {
    UserStore::init(stores).await
}

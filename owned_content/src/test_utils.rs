//! Shared helpers for tests that need initialized stores.

use crate::storage::Stores;
use crate::userdb::{User, UserStore};
use crate::utils::gen_random_string;

/// Fresh in-memory stores with every table created
pub(crate) async fn test_stores() -> Stores {
    let stores = Stores::in_memory().await.expect("in-memory stores");
    crate::init(&stores).await.expect("init stores");
    stores
}

/// Insert a user directly, skipping password hashing
pub(crate) async fn insert_test_user(stores: &Stores, username: &str) -> User {
    let id = gen_random_string(16).expect("random id");
    let user = User::new(id, username.to_string(), "pbkdf2_sha256$1$x$y".to_string());
    UserStore::create_user(stores, user)
        .await
        .expect("insert test user")
}

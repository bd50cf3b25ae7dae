use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered account. The id doubles as the owner reference on notes and
/// comments and never changes once assigned.
#[derive(Clone, Serialize, FromRow, PartialEq)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Login name, unique across all users
    pub username: String,
    /// Encoded PBKDF2 hash, see `userdb::password`
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, username: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

// Keep the hash out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Search field options for user lookup
#[derive(Debug, Clone)]
pub enum UserSearchField {
    Id(String),
    Username(String),
}

impl std::fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "Id({id})"),
            UserSearchField::Username(username) => write!(f, "Username({username})"),
        }
    }
}

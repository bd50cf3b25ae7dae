use crate::storage::Stores;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct UserStore;

impl UserStore {
    /// Create the users table if needed and validate its schema
    pub(crate) async fn init(stores: &Stores) -> Result<(), UserError> {
        let store = stores.data();

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a user by their ID
    #[tracing::instrument(skip(stores), fields(user_id = %id))]
    pub(crate) async fn get_user(stores: &Stores, id: &str) -> Result<Option<User>, UserError> {
        Self::get_user_by(stores, UserSearchField::Id(id.to_string())).await
    }

    #[tracing::instrument(skip(stores), fields(user_field = %field))]
    pub(crate) async fn get_user_by(
        stores: &Stores,
        field: UserSearchField,
    ) -> Result<Option<User>, UserError> {
        let store = stores.data();

        let result = if let Some(pool) = store.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => tracing::debug!(found = true, "User lookup completed"),
            Ok(None) => tracing::debug!(found = false, "User lookup completed - not found"),
            Err(e) => tracing::error!(error = %e, "User lookup failed"),
        }

        result
    }

    /// Insert a new user. A taken username yields `UserError::UsernameTaken`.
    #[tracing::instrument(skip(stores, user), fields(user_id = %user.id))]
    pub(crate) async fn create_user(stores: &Stores, user: User) -> Result<User, UserError> {
        tracing::debug!(username = %user.username, "Creating user");
        let store = stores.data();

        let result = if let Some(pool) = store.as_sqlite() {
            insert_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            insert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => tracing::info!(user_id = %user.id, "User created"),
            Err(e) => tracing::warn!(error = %e, "User creation failed"),
        }

        result
    }
}

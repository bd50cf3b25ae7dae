//! Database connection and table configuration

use std::{env, str::FromStr, sync::LazyLock};

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};
use crate::storage::errors::StorageError;

pub(crate) static GENERIC_DATA_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_TYPE").unwrap_or_else(|_| "sqlite".to_string())
});

pub(crate) static GENERIC_DATA_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_URL").unwrap_or_else(|_| "sqlite:owned_content.db".to_string())
});

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "oc_".to_string()));

/// An in-memory SQLite database lives only as long as its connection, so the
/// pool is pinned to a single connection that is never recycled.
fn is_sqlite_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

pub(crate) fn connect_data_store(
    store_type: &str,
    store_url: &str,
) -> Result<Box<dyn DataStore>, StorageError> {
    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store: Box<dyn DataStore> = match store_type {
        "sqlite" => {
            let opts = SqliteConnectOptions::from_str(store_url)?.create_if_missing(true);
            let pool_opts = if is_sqlite_in_memory(store_url) {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                SqlitePoolOptions::new()
            };

            Box::new(SqliteDataStore {
                pool: pool_opts.connect_lazy_with(opts),
            })
        }
        "postgres" => Box::new(PostgresDataStore {
            pool: PgPoolOptions::new().connect_lazy(store_url)?,
        }),
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
            )));
        }
    };

    tracing::info!(
        "Connected to database: type={}, url={}",
        store_type,
        store_url
    );

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sqlite_in_memory() {
        assert!(is_sqlite_in_memory("sqlite::memory:"));
        assert!(is_sqlite_in_memory("sqlite:file:test?mode=memory&cache=shared"));
        assert!(!is_sqlite_in_memory("sqlite:/tmp/owned_content.db"));
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let store = connect_data_store("sqlite", "sqlite::memory:").expect("sqlite store");
        assert!(store.as_sqlite().is_some());
        assert!(store.as_postgres().is_none());
    }

    #[tokio::test]
    async fn test_unsupported_store_type() {
        let result = connect_data_store("unsupported", "sqlite::memory:");
        match result {
            Err(StorageError::Config(msg)) => assert!(msg.contains("Unsupported store type")),
            _ => panic!("Expected Config error"),
        }
    }
}

mod cache_store;
mod data_store;
mod errors;
mod schema_validation;
mod types;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use cache_store::CacheStore;
pub use data_store::DataStore;
pub use errors::StorageError;
pub use types::CacheData;

pub(crate) use data_store::DB_TABLE_PREFIX;
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};

/// Handle to the data store and cache store used by every operation.
///
/// Cloning is cheap: both stores sit behind an `Arc`. Each test can build its
/// own isolated instance with [`Stores::in_memory`].
#[derive(Clone)]
pub struct Stores {
    data: Arc<dyn DataStore>,
    cache: Arc<Mutex<Box<dyn CacheStore>>>,
}

impl Stores {
    /// Connects using `GENERIC_DATA_STORE_*` and `GENERIC_CACHE_STORE_*`.
    pub async fn from_env() -> Result<Self, StorageError> {
        Self::connect(
            &data_store::GENERIC_DATA_STORE_TYPE,
            &data_store::GENERIC_DATA_STORE_URL,
            &cache_store::GENERIC_CACHE_STORE_TYPE,
            &cache_store::GENERIC_CACHE_STORE_URL,
        )
        .await
    }

    pub async fn connect(
        data_type: &str,
        data_url: &str,
        cache_type: &str,
        cache_url: &str,
    ) -> Result<Self, StorageError> {
        let data = data_store::connect_data_store(data_type, data_url)?;
        let cache = cache_store::connect_cache_store(cache_type, cache_url).await?;

        Ok(Self {
            data: Arc::from(data),
            cache: Arc::new(Mutex::new(cache)),
        })
    }

    /// A private in-memory SQLite database plus an in-memory cache.
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::connect("sqlite", "sqlite::memory:", "memory", "memory").await
    }

    pub(crate) fn data(&self) -> &dyn DataStore {
        self.data.as_ref()
    }

    pub(crate) fn cache(&self) -> &Mutex<Box<dyn CacheStore>> {
        &self.cache
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

use std::{env, sync::LazyLock};

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};
use crate::storage::errors::StorageError;

pub(crate) static GENERIC_CACHE_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

pub(crate) static GENERIC_CACHE_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_URL").unwrap_or_else(|_| "memory".to_string())
});

pub(crate) async fn connect_cache_store(
    store_type: &str,
    store_url: &str,
) -> Result<Box<dyn CacheStore>, StorageError> {
    tracing::info!(
        "Initializing cache store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store: Box<dyn CacheStore> = match store_type {
        "memory" => Box::new(InMemoryCacheStore::new()),
        "redis" => {
            let client = redis::Client::open(store_url).map_err(|e| {
                tracing::error!("Failed to create Redis client: {}", e);
                StorageError::from(e)
            })?;
            let store = RedisCacheStore { client };
            // Try to connect to verify the Redis server is available
            store.init().await.inspect_err(|e| {
                tracing::error!("Failed to connect to Redis: {}", e);
            })?;
            Box::new(store)
        }
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    tracing::info!(
        "Connected to cache store: type={}, url={}",
        store_type,
        store_url
    );

    Ok(store)
}

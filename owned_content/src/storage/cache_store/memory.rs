use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, InMemoryCacheStore};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory generic cache store");
        Self {
            entry: HashMap::new(),
        }
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }
}

fn is_expired(expires_at: Option<Instant>, now: Instant) -> bool {
    matches!(expires_at, Some(deadline) if deadline <= now)
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        let now = Instant::now();
        self.entry.retain(|_, (_, expires_at)| !is_expired(*expires_at, now));
        let expires_at = now.checked_add(Duration::from_secs(ttl as u64));
        self.entry.insert(key, (value, expires_at));
        Ok(())
    }

    async fn get(&mut self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(prefix, key);
        let expired = match self.entry.get(&key) {
            Some((_, expires_at)) => is_expired(*expires_at, Instant::now()),
            None => return Ok(None),
        };
        if expired {
            self.entry.remove(&key);
            return Ok(None);
        }
        Ok(self.entry.get(&key).map(|(data, _)| data.clone()))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        let result = InMemoryCacheStore::make_key("session", "user123");
        assert_eq!(result, "cache:session:user123");
    }

    #[tokio::test]
    async fn test_init() {
        let store = InMemoryCacheStore::new();
        assert!(store.init().await.is_ok());
    }

    #[tokio::test]
    async fn test_put_with_ttl_and_get() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "test value".to_string(),
        };

        store
            .put_with_ttl("test", "key1", value, 60)
            .await
            .expect("put should succeed");

        let retrieved = store.get("test", "key1").await.unwrap();
        assert_eq!(retrieved.unwrap().value, "test value");
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "short lived".to_string(),
        };

        store.put_with_ttl("test", "key2", value, 0).await.unwrap();

        assert!(store.get("test", "key2").await.unwrap().is_none());
        assert!(store.entry.is_empty());
    }

    #[tokio::test]
    async fn test_expired_entries_are_evicted() {
        let mut store = InMemoryCacheStore::new();
        for i in 0..1000 {
            let value = CacheData {
                value: format!("session {i}"),
            };
            store
                .put_with_ttl("session", &i.to_string(), value, 0)
                .await
                .unwrap();
        }
        // Each put sweeps what expired before it
        assert_eq!(store.entry.len(), 1);

        for i in 0..1000 {
            assert!(store.get("session", &i.to_string()).await.unwrap().is_none());
        }
        assert_eq!(store.entry.len(), 0);

        let live = CacheData {
            value: "live".to_string(),
        };
        store.put_with_ttl("session", "live", live, 60).await.unwrap();
        assert_eq!(store.entry.len(), 1);
        assert!(store.get("session", "live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_prefixes_are_isolated() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "scoped".to_string(),
        };

        store.put_with_ttl("session", "id", value, 60).await.unwrap();

        assert!(store.get("other", "id").await.unwrap().is_none());
        assert!(store.get("session", "id").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "to be removed".to_string(),
        };

        store.put_with_ttl("test", "key3", value, 60).await.unwrap();
        store.remove("test", "key3").await.unwrap();

        assert!(store.get("test", "key3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let mut store = InMemoryCacheStore::new();
        assert!(store.remove("test", "missing").await.is_ok());
    }
}

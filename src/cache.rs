//! The cache store collaborator.
//!
//! Any key-value store with `get`/`setex`/`del` semantics can back the
//! cache-aside layer; expiry is the store's responsibility. The original
//! deployment wires Redis — a Redis client satisfies this trait directly.
//! [`MemoryCache`] is an in-process implementation for tests and
//! single-process use.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::CacheError;

/// Key-value store with set-with-expiry semantics.
///
/// Each write is a single atomic `setex`; this layer adds no locking of
/// its own, so consistency of concurrent writes is delegated to the
/// store. `del` is idempotent: deleting an absent key succeeds.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn setex(&self, key: &str, ttl_secs: u64, value: &str) -> Result<(), CacheError>;
    async fn del(&self, key: &str) -> Result<(), CacheError>;
}

/// In-process cache with per-entry expiry deadlines.
///
/// Expired entries are dropped lazily on read; there is no background
/// eviction.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn setex(&self, key: &str, ttl_secs: u64, value: &str) -> Result<(), CacheError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_del_round_trip() {
        let cache = MemoryCache::new();
        cache.setex("k", 60, "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));

        cache.del("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);

        // Deleting an absent key is a success.
        cache.del("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();
        cache.setex("k", 0, "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_setex_overwrites() {
        let cache = MemoryCache::new();
        cache.setex("k", 60, "first").await.unwrap();
        cache.setex("k", 60, "second").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("second"));
    }
}

//! Named cache partitions.
//!
//! A `ZoneCache` is a handle onto one partition of the shared `CacheStore`;
//! keys from different partitions never collide.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::error::CacheError;

/// Cache store shared between partitions, handlers and the cleanup task.
pub type SharedCacheStore = Arc<RwLock<CacheStore>>;

/// Key/value cache with per-entry TTL.
///
/// Implementations must be safe to call from many concurrent lookups.
/// Writers are not coordinated; the last put for a key wins.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, expiring `ttl_seconds` from now.
    async fn put(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError>;
}

// == Zone Cache ==
#[derive(Clone)]
pub struct ZoneCache {
    name: String,
    store: SharedCacheStore,
}

impl ZoneCache {
    pub fn new(name: impl Into<String>, store: SharedCacheStore) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{}", self.name, key)
    }
}

#[async_trait]
impl KeyValueCache for ZoneCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: reads update recency and may drop an expired entry
        let mut store = self.store.write().await;
        Ok(store.get(&self.scoped(key)))
    }

    async fn put(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.put(self.scoped(key), value, ttl_seconds)
    }
}

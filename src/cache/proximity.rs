//! Proximity result cache.
//!
//! Stores the refined record list for a quantized location. Cache faults
//! never fail a lookup: a failed read is a miss and a failed write is
//! dropped.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::cache::KeyValueCache;
use crate::error::CacheError;
use crate::geo::CacheKey;
use crate::models::NearbyRecord;

#[derive(Clone)]
pub struct ProximityCache {
    backend: Arc<dyn KeyValueCache>,
}

impl ProximityCache {
    pub fn new(backend: Arc<dyn KeyValueCache>) -> Self {
        Self { backend }
    }

    // == Get ==
    /// Returns the cached records for `key`, preserving their order.
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<NearbyRecord>> {
        let payload = match self.backend.get(key.as_str()).await {
            Ok(payload) => payload?,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Undecodable cache entry, treating as miss");
                None
            }
        }
    }

    // == Put ==
    /// Best-effort write of `records` under `key` for `ttl_seconds`.
    pub async fn put(&self, key: &CacheKey, records: &[NearbyRecord], ttl_seconds: u64) {
        let result = match encode(records) {
            Ok(payload) => self.backend.put(key.as_str(), payload, ttl_seconds).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(cache_key = %key, error = %e, "Cache write failed, ignoring");
        }
    }

    /// Writes `records` from a background task so the caller never waits on
    /// the cache backend.
    ///
    /// The payload is encoded before spawning; the handle only matters to
    /// callers that want to observe the write.
    pub fn spawn_put(
        &self,
        key: &CacheKey,
        records: &[NearbyRecord],
        ttl_seconds: u64,
    ) -> Option<JoinHandle<()>> {
        let payload = match encode(records) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cache write failed, ignoring");
                return None;
            }
        };

        let backend = Arc::clone(&self.backend);
        let key = key.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = backend.put(key.as_str(), payload, ttl_seconds).await {
                warn!(cache_key = %key, error = %e, "Cache write failed, ignoring");
            }
        }))
    }
}

fn encode(records: &[NearbyRecord]) -> Result<String, CacheError> {
    Ok(serde_json::to_string(records)?)
}

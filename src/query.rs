//! Proximity Query
//!
//! The lookup pipeline: cache check, lazy config check, bounding-box range
//! query against the store, exact-distance refinement, cache write.

use std::sync::Arc;

use tracing::{error, info};

use crate::cache::ProximityCache;
use crate::config::BackendConfig;
use crate::error::{ProximityError, Result, StoreError};
use crate::geo::{bounding_box, distance_miles, CacheKey, Coordinate};
use crate::models::{Address, NearbyRecord};
use crate::store::{RawRecord, Store};

/// Tunables for one lookup.
#[derive(Debug, Clone, Copy)]
pub struct QuerySettings {
    /// Maximum rows requested from the store
    pub row_limit: usize,
    /// TTL in seconds for cached results
    pub cache_ttl: u64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            row_limit: 10,
            cache_ttl: 60,
        }
    }
}

/// Result of a lookup and whether it was served from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyResult {
    pub records: Vec<NearbyRecord>,
    pub from_cache: bool,
}

// == Proximity Query ==
/// Finds ATMs within a radius of a point.
///
/// Holds no per-request state; one instance serves concurrent lookups.
/// Concurrent misses on the same cache key each query the store.
pub struct ProximityQuery {
    cache: ProximityCache,
    store: Arc<dyn Store>,
    backend: BackendConfig,
    settings: QuerySettings,
}

impl ProximityQuery {
    pub fn new(
        cache: ProximityCache,
        store: Arc<dyn Store>,
        backend: BackendConfig,
        settings: QuerySettings,
    ) -> Self {
        Self {
            cache,
            store,
            backend,
            settings,
        }
    }

    // == Execute ==
    /// Returns the ATMs within `radius` miles of (`lat`, `lng`).
    ///
    /// A cache hit returns immediately and needs no backend configuration.
    /// On a miss the store is queried once; its failure is not retried and
    /// nothing is cached. A successful result is written to the cache in the
    /// background, so a repeat lookup may race the write and miss.
    pub async fn execute(&self, lat: f64, lng: f64, radius: f64) -> Result<NearbyResult> {
        let center = Coordinate::new(lat, lng);
        let key = CacheKey::from_coordinate(&center);
        info!(cache_key = %key, "Cache key");

        if let Some(records) = self.cache.get(&key).await {
            info!(cache_key = %key, "Cache hit for key");
            return Ok(NearbyResult {
                records,
                from_cache: true,
            });
        }

        let credentials = self.backend.credentials().map_err(|e| {
            error!(error = %e, "Backend configuration incomplete");
            e
        })?;

        let bbox = bounding_box(&center, radius);
        let rows = self
            .store
            .query_by_bounding_box(&credentials, &bbox, self.settings.row_limit)
            .await
            .map_err(|e| {
                error!(cache_key = %key, error = %e, "Error fetching ATMs");
                ProximityError::Backend(e)
            })?;

        let records = refine(&center, radius, rows).map_err(|e| {
            error!(cache_key = %key, error = %e, "Error decoding ATM rows");
            ProximityError::Backend(e)
        })?;

        self.cache.spawn_put(&key, &records, self.settings.cache_ttl);

        Ok(NearbyResult {
            records,
            from_cache: false,
        })
    }
}

// == Refine ==
/// Decodes each row, measures it from `center`, and keeps those within
/// `radius`. Store order is preserved.
///
/// Any undecodable address fails the whole batch.
pub fn refine(
    center: &Coordinate,
    radius: f64,
    rows: Vec<RawRecord>,
) -> std::result::Result<Vec<NearbyRecord>, StoreError> {
    let mut nearby = Vec::with_capacity(rows.len());

    for row in rows {
        let address: Address =
            serde_json::from_str(&row.address).map_err(|source| StoreError::AddressDecode {
                id: row.id.clone(),
                source,
            })?;
        let distance = distance_miles(center, &row.coordinate());

        if distance <= radius {
            nearby.push(NearbyRecord {
                id: row.id,
                name: row.name,
                latitude: row.lat,
                longitude: row.long,
                address,
                distance,
            });
        }
    }

    Ok(nearby)
}

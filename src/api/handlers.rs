//! API Handlers
//!
//! HTTP request handlers for the ATM locator endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::HeaderName,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::cache::{CacheStore, ProximityCache, SharedCacheStore, ZoneCache};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{HealthResponse, NearbyParams, StatsResponse};
use crate::query::{ProximityQuery, QuerySettings};
use crate::store::{D1Store, Store};

/// Header set on responses served from the cache.
pub const CACHE_HIT_HEADER: HeaderName = HeaderName::from_static("cache-hit");

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lookup pipeline
    pub query: Arc<ProximityQuery>,
    /// Cache store behind the proximity cache, shared with the cleanup task
    pub cache: SharedCacheStore,
}

impl AppState {
    pub fn new(query: ProximityQuery, cache: SharedCacheStore) -> Self {
        Self {
            query: Arc::new(query),
            cache,
        }
    }

    /// Builds the state from configuration with the D1 store as backend.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StoreError> {
        let store = D1Store::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Builds the state from configuration around an arbitrary store.
    pub fn with_store(config: &Config, store: Arc<dyn Store>) -> Self {
        let cache: SharedCacheStore = Arc::new(RwLock::new(CacheStore::new(config.max_entries)));
        let zone = ZoneCache::new(config.cache_partition.clone(), cache.clone());
        let query = ProximityQuery::new(
            ProximityCache::new(Arc::new(zone)),
            store,
            config.backend.clone(),
            QuerySettings {
                row_limit: config.row_limit,
                cache_ttl: config.cache_ttl,
            },
        );
        Self::new(query, cache)
    }
}

/// Handler for GET /atms?lat=&lng=&radius=
///
/// Returns the ATMs within `radius` miles as a JSON array. Responses served
/// from the cache carry `cache-hit: true`.
///
/// The query string is taken as raw pairs so that repeated or unexpected
/// names never produce the extractor's plain-text rejection.
pub async fn nearby_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let search = NearbyParams::from_pairs(pairs).validate()?;
    let result = state
        .query
        .execute(search.lat, search.lng, search.radius)
        .await?;

    if result.from_cache {
        Ok(([(CACHE_HIT_HEADER, "true")], Json(result.records)).into_response())
    } else {
        Ok(Json(result.records).into_response())
    }
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

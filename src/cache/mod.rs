//! Cache Module
//!
//! TTL key/value storage and the proximity result cache built on it.

mod entry;
mod lru;
mod proximity;
mod stats;
mod store;
mod zone;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use proximity::ProximityCache;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use zone::{KeyValueCache, SharedCacheStore, ZoneCache};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Partition used for proximity results
pub const DEFAULT_PARTITION: &str = "atm-cache";

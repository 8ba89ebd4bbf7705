//! Cache Statistics Module
//!
//! Counters describing how well location quantization is paying off.

use serde::Serialize;

// == Cache Stats ==
/// Outcome counters for the shared cache store.
///
/// An expired entry found by a read counts both as a miss and as an
/// expiration; one dropped by the background sweep counts only as an
/// expiration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped to make room at capacity
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Live entries when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of lookups served from the cache, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// A read found the entry but its TTL had elapsed.
    pub(crate) fn record_expired_read(&mut self) {
        self.misses += 1;
        self.expirations += 1;
    }

    pub(crate) fn record_sweep(&mut self, removed: usize) {
        self.expirations += removed as u64;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Copy of the counters with the live entry count filled in.
    pub(crate) fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }
}

//! LRU Tracker Module
//!
//! Recency bookkeeping for capacity-based eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Each touch stamps the key with a monotonically increasing tick; the
/// smallest tick is the least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    tick: u64,
    ticks_by_key: HashMap<String, u64>,
    keys_by_tick: BTreeMap<u64, String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as most recently used, tracking it if new.
    pub fn touch(&mut self, key: &str) {
        self.tick += 1;
        if let Some(old) = self.ticks_by_key.insert(key.to_string(), self.tick) {
            self.keys_by_tick.remove(&old);
        }
        self.keys_by_tick.insert(self.tick, key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        if let Some(old) = self.ticks_by_key.remove(key) {
            self.keys_by_tick.remove(&old);
        }
    }

    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.keys_by_tick.pop_first()?;
        self.ticks_by_key.remove(&key);
        Some(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ticks_by_key.len()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.ticks_by_key.contains_key(key)
    }
}

//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check storage, capacity and recency behavior of the
//! cache store and the proximity cache layered over it.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheStore, ProximityCache, ZoneCache};
use crate::geo::{CacheKey, Coordinate};
use crate::models::{Address, NearbyRecord};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_TTL: u64 = 60;

// == Strategies ==
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_.-]{1,64}"
}

fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

fn record_strategy() -> impl Strategy<Value = NearbyRecord> {
    (
        "[a-z0-9]{1,12}",
        "[A-Za-z ]{1,24}",
        -90.0f64..=90.0,
        -180.0f64..=180.0,
        0.0f64..25.0,
        "[0-9]{5}",
    )
        .prop_map(|(id, name, latitude, longitude, distance, zip)| NearbyRecord {
            id,
            name,
            latitude,
            longitude,
            address: Address {
                street_name: "Main St".to_string(),
                street_number: "42".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip,
            },
            distance,
        })
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: proximity results survive a put/get round trip unchanged
    #[test]
    fn prop_proximity_round_trip(
        records in prop::collection::vec(record_strategy(), 0..10),
        lat in -90.0f64..=90.0,
        lng in -180.0f64..=180.0
    ) {
        let store = Arc::new(RwLock::new(CacheStore::new(TEST_MAX_ENTRIES)));
        let cache = ProximityCache::new(Arc::new(ZoneCache::new("atm-cache", store)));
        let key = CacheKey::from_coordinate(&Coordinate::new(lat, lng));

        let cached = tokio_test::block_on(async {
            cache.put(&key, &records, TEST_TTL).await;
            cache.get(&key).await
        });

        prop_assert_eq!(cached, Some(records));
    }

    // Property: hit and miss counters match what callers observed
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key, value, TEST_TTL).unwrap();
                }
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // Property: the store never holds more than its capacity
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((valid_key_strategy(), valid_value_strategy()), 1..200)
    ) {
        let max_entries = 50;
        let mut store = CacheStore::new(max_entries);

        for (key, value) in entries {
            store.put(key, value, TEST_TTL).unwrap();
            prop_assert!(store.len() <= max_entries);
        }
    }

    // Property: a full store evicts the least recently used key first
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::hash_set(valid_key_strategy(), 2..10),
        new_key in valid_key_strategy()
    ) {
        prop_assume!(!keys.contains(&new_key));
        let keys: Vec<String> = keys.into_iter().collect();

        let mut store = CacheStore::new(keys.len());
        for key in &keys {
            store.put(key.clone(), "v".to_string(), TEST_TTL).unwrap();
        }
        store.put(new_key.clone(), "v".to_string(), TEST_TTL).unwrap();

        prop_assert_eq!(store.len(), keys.len());
        prop_assert!(store.get(&keys[0]).is_none());
        prop_assert!(store.get(&new_key).is_some());
        let survivors: HashSet<&String> = keys.iter().skip(1).collect();
        for key in survivors {
            prop_assert!(store.get(key).is_some());
        }
    }
}

// Fewer cases for the time-sensitive TTL property
proptest! {
    #![proptest_config(ProptestConfig::with_cases(3))]

    // Property: an entry is a miss once its TTL has elapsed
    #[test]
    fn prop_ttl_expiration_behavior(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.put(key.clone(), value.clone(), 1).unwrap();
        prop_assert_eq!(store.get(&key), Some(value));

        sleep(Duration::from_millis(1100));

        prop_assert_eq!(store.get(&key), None);
    }
}

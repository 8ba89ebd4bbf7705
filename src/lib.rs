//! ATM Locator - nearby ATM lookup service
//!
//! Narrows the ATM table to a bounding box around the request center,
//! keeps rows within the exact great-circle radius, and caches results per
//! 0.01° cell so that nearby requests skip the backend.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod query;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use query::{NearbyResult, ProximityQuery, QuerySettings};
pub use tasks::spawn_cleanup_task;

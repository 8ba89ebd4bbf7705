//! Request and Response models for the ATM locator API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP query strings and response bodies.

pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use record::{Address, NearbyRecord};
pub(crate) use record::string_or_number;
pub use requests::{NearbyParams, NearbySearch};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};

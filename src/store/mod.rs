//! Store Module
//!
//! The backend data store holding ATM rows, reached through the `Store`
//! trait. `D1Store` talks to a Cloudflare D1 database over HTTP.

mod d1;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::D1Credentials;
use crate::error::StoreError;
use crate::geo::{BoundingBox, Coordinate};
use crate::models::string_or_number;

pub use d1::{D1Store, SELECT_WITHIN_BOX};

// == Raw Record ==
/// One ATM row as returned by the backend.
///
/// `address` is still the encoded JSON string stored in the table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    /// Integer primary keys arrive as JSON numbers
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub long: f64,
}

impl RawRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.long)
    }
}

// == Store Trait ==
/// Range query over the ATM table.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns up to `limit` rows whose coordinates fall inside `bbox`
    /// (edges included), in backend order.
    async fn query_by_bounding_box(
        &self,
        credentials: &D1Credentials,
        bbox: &BoundingBox,
        limit: usize,
    ) -> Result<Vec<RawRecord>, StoreError>;
}

//! Error types for the ATM locator
//!
//! Provides unified error handling using thiserror. Only `ProximityError`
//! reaches HTTP clients, and server-side variants are rendered with a fixed
//! generic message; the detail stays in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proximity Error Enum ==
/// Errors returned by a proximity lookup.
#[derive(Error, Debug)]
pub enum ProximityError {
    /// Missing or unparseable request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backend credentials are not configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The backend store failed or returned unusable data
    #[error("Backend error: {0}")]
    Backend(#[from] StoreError),
}

impl ProximityError {
    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ProximityError::InvalidInput(_) => {
                (StatusCode::BAD_REQUEST, "Missing required parameters")
            }
            ProximityError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Missing Cloudflare configuration",
            ),
            ProximityError::Backend(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProximityError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Store Error Enum ==
/// Failures of the backend store collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Request could not be sent or the response could not be read
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// Backend envelope reported `success: false`
    #[error("query rejected by backend: {0}")]
    Rejected(String),

    /// Backend envelope did not have the expected shape
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    /// A row's address column is not a valid encoded address
    #[error("undecodable address for record {id}: {source}")]
    AddressDecode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Cache Error Enum ==
/// Failures of the key-value cache. Never surfaced to API clients.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key exceeds the maximum length
    #[error("Key exceeds maximum length of {0} bytes")]
    KeyTooLong(usize),

    /// Value exceeds the maximum size
    #[error("Value exceeds maximum size of {0} bytes")]
    ValueTooLarge(usize),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Cached payload could not be encoded or decoded
    #[error("Cache payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for proximity lookups.
pub type Result<T> = std::result::Result<T, ProximityError>;

//! Cloudflare D1 store.
//!
//! Issues the bounding-box query through the D1 HTTP query API and unpacks
//! the rows from its response envelope.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::D1Credentials;
use crate::error::StoreError;
use crate::geo::BoundingBox;
use crate::store::{RawRecord, Store};

/// Parameterized range query; binds min/max latitude, min/max longitude,
/// then the row limit.
pub const SELECT_WITHIN_BOX: &str = "SELECT * FROM atms \
     WHERE lat BETWEEN ? AND ? \
     AND long BETWEEN ? AND ? \
     LIMIT ?";

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    sql: &'a str,
    params: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    errors: Vec<EnvelopeMessage>,
    #[serde(default)]
    result: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeMessage {
    #[serde(default)]
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    results: Vec<RawRecord>,
}

impl Envelope {
    fn into_rows(self) -> Result<Vec<RawRecord>, StoreError> {
        if !self.success {
            let reasons: Vec<String> = self
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect();
            return Err(StoreError::Rejected(if reasons.is_empty() {
                "Cloudflare API request failed".to_string()
            } else {
                reasons.join("; ")
            }));
        }

        self.result
            .into_iter()
            .next()
            .map(|first| first.results)
            .ok_or_else(|| StoreError::MalformedResponse("missing result set".to_string()))
    }
}

// == D1 Store ==
#[derive(Debug, Clone)]
pub struct D1Store {
    client: reqwest::Client,
    base_url: String,
}

impl D1Store {
    /// Creates a store against `base_url` (e.g. the public Cloudflare API)
    /// whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn query_url(&self, credentials: &D1Credentials) -> String {
        format!(
            "{}/accounts/{}/d1/database/{}/query",
            self.base_url, credentials.account_id, credentials.database_id
        )
    }
}

#[async_trait]
impl Store for D1Store {
    async fn query_by_bounding_box(
        &self,
        credentials: &D1Credentials,
        bbox: &BoundingBox,
        limit: usize,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let request = QueryRequest {
            sql: SELECT_WITHIN_BOX,
            params: vec![
                json!(bbox.min_lat),
                json!(bbox.max_lat),
                json!(bbox.min_lng),
                json!(bbox.max_lng),
                json!(limit),
            ],
        };
        debug!(?bbox, limit, "Querying D1 for ATMs in bounding box");

        let response = self
            .client
            .post(self.query_url(credentials))
            .bearer_auth(&credentials.api_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
        envelope.into_rows()
    }
}

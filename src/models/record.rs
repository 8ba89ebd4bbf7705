//! ATM record models
//!
//! `Address` and `NearbyRecord` are what the API returns and what the
//! proximity cache stores.

use serde::{Deserialize, Deserializer, Serialize};

/// Structured street address decoded from a backend row.
///
/// Numeric fields such as `zip` or `street_number` may be stored as JSON
/// numbers; they are returned as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(deserialize_with = "string_or_number")]
    pub street_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub street_number: String,
    #[serde(deserialize_with = "string_or_number")]
    pub city: String,
    #[serde(deserialize_with = "string_or_number")]
    pub state: String,
    #[serde(deserialize_with = "string_or_number")]
    pub zip: String,
}

/// An ATM within the requested radius, with its distance from the request
/// center in miles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRecord {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Address,
    pub distance: f64,
}

/// Accepts a JSON string or number and keeps its text.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Text(s) => s,
        Text::Number(n) => n.to_string(),
    })
}

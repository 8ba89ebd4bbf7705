//! Request DTOs for the ATM locator API
//!
//! Defines the query parameters accepted by the lookup endpoint.

use crate::error::{ProximityError, Result};

/// Query parameters for GET /atms
///
/// Kept as raw strings so that a missing or malformed value surfaces as the
/// API's own 400 body rather than the extractor's rejection.
#[derive(Debug, Clone, Default)]
pub struct NearbyParams {
    /// Latitude of the search center, in degrees
    pub lat: Option<String>,
    /// Longitude of the search center, in degrees
    pub lng: Option<String>,
    /// Search radius in miles
    pub radius: Option<String>,
}

/// Validated search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbySearch {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
}

impl NearbyParams {
    /// Collects the lookup parameters from decoded query pairs.
    ///
    /// A repeated name keeps its first value; unknown names are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "lat" => &mut params.lat,
                "lng" => &mut params.lng,
                "radius" => &mut params.radius,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    /// Parses all three parameters as finite numbers.
    ///
    /// The radius sign is not checked: a zero or negative radius is a valid
    /// search that simply matches nothing.
    pub fn validate(&self) -> Result<NearbySearch> {
        Ok(NearbySearch {
            lat: parse_param("lat", self.lat.as_deref())?,
            lng: parse_param("lng", self.lng.as_deref())?,
            radius: parse_param("radius", self.radius.as_deref())?,
        })
    }
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ProximityError::InvalidInput(format!("{} is missing", name)))?;

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProximityError::InvalidInput(format!(
            "{} is not a finite number: {:?}",
            name, raw
        ))),
    }
}

//! Geo Math Module
//!
//! Bounding-box derivation and great-circle distance on a spherical Earth.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

// == Coordinate ==
/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

// == Bounding Box ==
/// Axis-aligned latitude/longitude rectangle used to prefilter candidates.
///
/// Longitudes are not wrapped at the antimeridian, so a box centered near
/// ±180° can extend past the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Returns true if the coordinate lies inside the box, edges included.
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

// == Bounding Box Calculation ==
/// Computes the box enclosing a circle of `radius_miles` around `center`.
///
/// The longitude half-width is divided by `cos(latitude)`. Near the poles
/// that cosine approaches zero and the longitude span grows without bound;
/// the value is returned as computed.
pub fn bounding_box(center: &Coordinate, radius_miles: f64) -> BoundingBox {
    let lat_delta = (radius_miles / EARTH_RADIUS_MILES) * (180.0 / PI);
    let lng_delta = (radius_miles
        / (EARTH_RADIUS_MILES * to_radians(center.latitude).cos()))
        * (180.0 / PI);

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lng: center.longitude - lng_delta,
        max_lng: center.longitude + lng_delta,
    }
}

// == Haversine Distance ==
/// Great-circle distance between two coordinates, in miles.
pub fn distance_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = to_radians(b.latitude - a.latitude);
    let d_lng = to_radians(b.longitude - a.longitude);

    let h = (d_lat / 2.0).sin().powi(2)
        + to_radians(a.latitude).cos()
            * to_radians(b.latitude).cos()
            * (d_lng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

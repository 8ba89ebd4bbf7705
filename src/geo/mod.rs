//! Geo Module
//!
//! Coordinate geometry for proximity lookups and the quantized cache key
//! derived from a request center.

mod key;
mod math;

#[cfg(test)]
mod property_tests;

pub use key::CacheKey;
pub use math::{bounding_box, distance_miles, BoundingBox, Coordinate, EARTH_RADIUS_MILES};

//! Cache key quantization.

use std::fmt;

use crate::geo::Coordinate;

/// Location cache key: latitude and longitude rounded to two decimals.
///
/// Two request centers inside the same 0.01° cell share a key (worst case
/// about 0.69 square miles), so nearby lookups reuse one cached result.
///
/// # Examples
///
/// ```
/// use atm_locator::geo::{CacheKey, Coordinate};
///
/// let key = CacheKey::from_coordinate(&Coordinate::new(40.7128, -74.0060));
/// assert_eq!(key.as_str(), "40.71_-74.01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_coordinate(coordinate: &Coordinate) -> Self {
        Self(format!(
            "{}_{}",
            two_decimals(coordinate.latitude),
            two_decimals(coordinate.longitude)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed-point rendering with two decimals.
///
/// `{:.2}` rounds the exact binary value, with ties to even. Exact ties
/// (values such as 0.125 whose product with 100 has no rounding error)
/// round half away from zero instead. Negative zero is printed as `0.00`.
fn two_decimals(value: f64) -> String {
    let scaled = value * 100.0;
    let exact_product = value.mul_add(100.0, -scaled) == 0.0;

    let rendered = if exact_product && scaled.fract().abs() == 0.5 {
        let rounded = scaled.trunc() + scaled.signum();
        format!("{:.2}", rounded / 100.0)
    } else {
        format!("{:.2}", value)
    };

    match rendered.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(lat: f64, lng: f64) -> String {
        CacheKey::from_coordinate(&Coordinate::new(lat, lng)).to_string()
    }

    #[test]
    fn test_key_new_york() {
        assert_eq!(key(40.7128, -74.0060), "40.71_-74.01");
    }

    #[test]
    fn test_key_pads_to_two_decimals() {
        assert_eq!(key(1.0, -2.5), "1.00_-2.50");
        assert_eq!(key(0.0, 0.0), "0.00_0.00");
    }

    #[test]
    fn test_key_nearby_points_collide() {
        assert_eq!(key(40.7128, -74.0060), key(40.7149, -74.0051));
    }

    #[test]
    fn test_key_distinct_cells_differ() {
        assert_ne!(key(40.7128, -74.0060), key(40.7228, -74.0060));
    }

    #[test]
    fn test_key_negative_zero_is_canonical() {
        assert_eq!(key(-0.0, -0.001), "0.00_0.00");
        assert_eq!(key(-0.004, 0.004), "0.00_0.00");
    }

    #[test]
    fn test_key_small_negative_keeps_sign() {
        assert_eq!(key(-0.005001, -0.01), "-0.01_-0.01");
    }

    #[test]
    fn test_key_exact_ties_round_away_from_zero() {
        assert_eq!(key(0.125, -0.125), "0.13_-0.13");
        assert_eq!(key(2.375, -2.625), "2.38_-2.63");
    }

    #[test]
    fn test_key_inexact_half_is_not_a_tie() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(key(1.005, 0.0), "1.00_0.00");
    }

    #[test]
    fn test_key_never_uses_scientific_notation() {
        assert_eq!(key(1e-10, -180.0), "0.00_-180.00");
        assert_eq!(key(89.999999, 179.999), "90.00_180.00");
    }
}

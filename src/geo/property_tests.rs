//! Property-Based Tests for Geo Module
//!
//! Uses proptest to check distance, bounding-box and cache-key behavior over
//! generated coordinates.

use proptest::prelude::*;

use crate::geo::{bounding_box, distance_miles, CacheKey, Coordinate, EARTH_RADIUS_MILES};

// == Strategies ==
fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

/// Centers away from the poles and the antimeridian, where the box formula
/// is not meant to hold.
fn mid_latitude_strategy() -> impl Strategy<Value = Coordinate> {
    (-70.0f64..=70.0, -170.0f64..=170.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

/// Point reached by travelling `distance` miles from `start` along `bearing`.
fn destination(start: &Coordinate, bearing_deg: f64, distance: f64) -> Coordinate {
    let delta = distance / EARTH_RADIUS_MILES;
    let theta = bearing_deg.to_radians();
    let phi1 = start.latitude.to_radians();
    let lambda1 = start.longitude.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    Coordinate::new(phi2.to_degrees(), lambda2.to_degrees())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Property: distance symmetry
    #[test]
    fn prop_distance_symmetric(a in coordinate_strategy(), b in coordinate_strategy()) {
        let there = distance_miles(&a, &b);
        let back = distance_miles(&b, &a);
        prop_assert!((there - back).abs() < 1e-9, "{} != {}", there, back);
    }

    // Property: zero self-distance
    #[test]
    fn prop_self_distance_zero(a in coordinate_strategy()) {
        prop_assert!(distance_miles(&a, &a).abs() < 1e-9);
    }

    // Property: distance is never negative and never exceeds half the circumference
    #[test]
    fn prop_distance_bounded(a in coordinate_strategy(), b in coordinate_strategy()) {
        let d = distance_miles(&a, &b);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= EARTH_RADIUS_MILES * std::f64::consts::PI + 1e-6);
    }

    // Property: every point within the radius lies inside the bounding box
    #[test]
    fn prop_bounding_box_is_superset(
        center in mid_latitude_strategy(),
        radius in 0.1f64..50.0,
        bearing in 0.0f64..360.0,
        fraction in 0.0f64..=1.0
    ) {
        let bbox = bounding_box(&center, radius);
        let point = destination(&center, bearing, radius * fraction * 0.999);

        prop_assert!(distance_miles(&center, &point) <= radius);
        prop_assert!(
            bbox.contains(&point),
            "{:?} within {} miles of {:?} but outside {:?}",
            point, radius, center, bbox
        );
    }

    // Property: coordinates that round to the same pair share a key
    #[test]
    fn prop_key_depends_only_on_rounded_pair(
        lat_cell in -8999i32..=8999,
        lng_cell in -17999i32..=17999,
        lat_jitter in -0.004f64..0.004,
        lng_jitter in -0.004f64..0.004
    ) {
        let center = Coordinate::new(lat_cell as f64 / 100.0, lng_cell as f64 / 100.0);
        let jittered = Coordinate::new(center.latitude + lat_jitter, center.longitude + lng_jitter);

        prop_assert_eq!(
            CacheKey::from_coordinate(&center),
            CacheKey::from_coordinate(&jittered)
        );
    }

    // Property: keys are fixed-point with two decimals on each side
    #[test]
    fn prop_key_format(c in coordinate_strategy()) {
        let key = CacheKey::from_coordinate(&c);
        let parts: Vec<&str> = key.as_str().split('_').collect();

        prop_assert_eq!(parts.len(), 2);
        for part in parts {
            prop_assert!(!part.contains('e') && !part.contains('E'));
            prop_assert_ne!(part, "-0.00");
            let decimals = part.split('.').nth(1).unwrap_or("");
            prop_assert_eq!(decimals.len(), 2);
        }
    }
}

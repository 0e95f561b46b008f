//! Geometric helpers: great-circle distance and speed-based travel estimates.
//!
//! Everything here is pure and infallible. `estimate_travel_minutes` is the
//! last line of defence when routing is unavailable, so it must never fail.

use crate::domain::{Coordinate, TransportMode};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Approximate meters per degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Haversine distance between two coordinates, in meters.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let d_phi = (b.latitude() - a.latitude()).to_radians();
    let d_lambda = (b.longitude() - a.longitude()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Average door-to-door speed for a mode, in km/h.
pub fn speed_kmh(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walking => 5.0,
        TransportMode::Transit => 20.0,
        TransportMode::Driving => 30.0,
    }
}

/// Travel time estimate from straight-line distance and the mode's speed,
/// rounded up to whole minutes.
pub fn estimate_travel_minutes(a: Coordinate, b: Coordinate, mode: TransportMode) -> u32 {
    let km = distance_meters(a, b) / 1000.0;
    let minutes = (km / speed_kmh(mode) * 60.0).ceil();
    // Antipodal points by car are ~667 hours; well inside u32.
    minutes.max(0.0) as u32
}

/// Offset `origin` by `radius_degrees` along `bearing_degrees` on a flat
/// approximation (north = 0°, clockwise). Only reasonable for small radii.
pub fn planar_offset(origin: Coordinate, bearing_degrees: f64, radius_degrees: f64) -> Coordinate {
    let bearing = bearing_degrees.to_radians();
    Coordinate::clamped(
        origin.latitude() + radius_degrees * bearing.cos(),
        origin.longitude() + radius_degrees * bearing.sin(),
    )
}

/// Half-widths in degrees of a box of `radius_meters` around `center`:
/// `(latitude_delta, longitude_delta)`.
pub fn bounding_deltas(center: Coordinate, radius_meters: f64) -> (f64, f64) {
    let lat_delta = radius_meters / METERS_PER_DEGREE;
    let cos_lat = center.latitude().to_radians().cos().abs().max(1e-6);
    let lng_delta = (radius_meters / (METERS_PER_DEGREE * cos_lat)).min(180.0);
    (lat_delta, lng_delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = c(51.5074, -0.1278);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn known_distance_london_paris() {
        // ~343.5 km great-circle.
        let d = distance_meters(c(51.5074, -0.1278), c(48.8566, 2.3522));
        assert!((d - 343_500.0).abs() < 2_000.0, "got {d}");
    }

    #[test]
    fn one_degree_latitude() {
        let d = distance_meters(c(0.0, 0.0), c(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn estimate_rounds_up() {
        // 1 degree of latitude at 5 km/h = 1334.3 minutes → 1335.
        let m = estimate_travel_minutes(c(0.0, 0.0), c(1.0, 0.0), TransportMode::Walking);
        assert_eq!(m, 1335);

        assert_eq!(
            estimate_travel_minutes(c(0.0, 0.0), c(0.0, 0.0), TransportMode::Driving),
            0
        );
    }

    #[test]
    fn faster_modes_take_less_time() {
        let a = c(40.7128, -74.0060);
        let b = c(40.7580, -73.9855);
        let walk = estimate_travel_minutes(a, b, TransportMode::Walking);
        let transit = estimate_travel_minutes(a, b, TransportMode::Transit);
        let drive = estimate_travel_minutes(a, b, TransportMode::Driving);
        assert!(walk > transit);
        assert!(transit >= drive);
    }

    #[test]
    fn planar_offset_moves_along_bearing() {
        let origin = c(10.0, 20.0);
        let north = planar_offset(origin, 0.0, 0.01);
        assert!((north.latitude() - 10.01).abs() < 1e-12);
        assert!((north.longitude() - 20.0).abs() < 1e-12);

        let east = planar_offset(origin, 90.0, 0.01);
        assert!((east.latitude() - 10.0).abs() < 1e-12);
        assert!((east.longitude() - 20.01).abs() < 1e-12);
    }

    #[test]
    fn bounding_deltas_widen_longitude_away_from_equator() {
        let (lat0, lng0) = bounding_deltas(c(0.0, 0.0), 1_110.0);
        assert!((lat0 - 0.01).abs() < 1e-9);
        assert!((lng0 - 0.01).abs() < 1e-9);

        let (_, lng60) = bounding_deltas(c(60.0, 0.0), 1_110.0);
        assert!((lng60 - 0.02).abs() < 1e-6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn coordinate() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0f64, -180.0..=180.0f64).prop_map(|(lat, lng)| c(lat, lng))
        }

        proptest! {
            #[test]
            fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
                let ab = distance_meters(a, b);
                let ba = distance_meters(b, a);
                prop_assert!((ab - ba).abs() < 1e-6, "{} != {}", ab, ba);
            }

            #[test]
            fn distance_is_bounded(a in coordinate(), b in coordinate()) {
                let d = distance_meters(a, b);
                prop_assert!(d >= 0.0);
                prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_METERS + 1.0);
            }

            #[test]
            fn distance_to_self_is_zero(a in coordinate()) {
                prop_assert_eq!(distance_meters(a, a), 0.0);
            }

            #[test]
            fn estimate_never_panics(a in coordinate(), b in coordinate()) {
                for mode in TransportMode::ALL {
                    let _ = estimate_travel_minutes(a, b, mode);
                }
            }
        }
    }
}

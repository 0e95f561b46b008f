//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a coordinate outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`;
/// neither is ever NaN. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use adventure_planner::domain::Coordinate;
///
/// let london = Coordinate::new(51.5074, -0.1278).unwrap();
/// assert_eq!(london.latitude(), 51.5074);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, 180.5).is_err());
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let invalid = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("must be finite numbers"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be between -180 and 180"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate, clamping latitude and wrapping longitude into range.
    ///
    /// Used for computed positions (e.g. radial offsets) that may step just
    /// outside the valid range near the poles or the antimeridian.
    pub fn clamped(latitude: f64, longitude: f64) -> Self {
        let latitude = if latitude.is_finite() {
            latitude.clamp(-90.0, 90.0)
        } else {
            0.0
        };
        let longitude = if longitude.is_finite() {
            let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
            if wrapped == -180.0 && longitude > 0.0 {
                180.0
            } else {
                wrapped
            }
        } else {
            0.0
        };
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Round to a fixed number of decimal places and return an exact,
    /// hashable key. Two coordinates that round to the same key are treated
    /// as the same point by caches and duplicate detection.
    pub fn rounded_key(&self, precision: u32) -> CoordinateKey {
        let multiplier = 10_f64.powi(precision.min(9) as i32);
        CoordinateKey {
            latitude: (self.latitude * multiplier).round() as i64,
            longitude: (self.longitude * multiplier).round() as i64,
        }
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// A coordinate rounded to fixed precision, usable as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey {
    latitude: i64,
    longitude: i64,
}

/// Wire shape used by serde; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        RawCoordinate {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

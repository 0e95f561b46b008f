//! Transport modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported transport mode: {0:?}")]
pub struct InvalidTransportMode(String);

/// How the traveller moves between stops.
///
/// # Examples
///
/// ```
/// use adventure_planner::domain::TransportMode;
///
/// assert_eq!(TransportMode::parse("car/taxi").unwrap(), TransportMode::Driving);
/// assert_eq!(TransportMode::parse("Public Transit").unwrap(), TransportMode::Transit);
/// assert!(TransportMode::parse("hovercraft").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TransportMode {
    Walking,
    Transit,
    Driving,
}

impl TransportMode {
    /// All supported modes, slowest first.
    pub const ALL: [TransportMode; 3] = [
        TransportMode::Walking,
        TransportMode::Transit,
        TransportMode::Driving,
    ];

    /// Parse a mode name.
    ///
    /// Accepts the routing names (`walking`, `transit`, `driving`) and the
    /// user-facing names (`public transit`, `car/taxi`, `car`, `taxi`),
    /// case-insensitively.
    pub fn parse(s: &str) -> Result<Self, InvalidTransportMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" | "walk" => Ok(TransportMode::Walking),
            "transit" | "public transit" | "public_transit" => Ok(TransportMode::Transit),
            "driving" | "car/taxi" | "car" | "taxi" => Ok(TransportMode::Driving),
            _ => Err(InvalidTransportMode(s.to_string())),
        }
    }

    /// Canonical machine name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Transit => "transit",
            TransportMode::Driving => "driving",
        }
    }

    /// Name shown to travellers.
    pub fn display_name(&self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Transit => "public transit",
            TransportMode::Driving => "car/taxi",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TransportMode {
    type Error = InvalidTransportMode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TransportMode::parse(&s)
    }
}

impl From<TransportMode> for &'static str {
    fn from(mode: TransportMode) -> Self {
        mode.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_spellings() {
        assert_eq!(TransportMode::parse("walking").unwrap(), TransportMode::Walking);
        assert_eq!(TransportMode::parse("transit").unwrap(), TransportMode::Transit);
        assert_eq!(
            TransportMode::parse("public transit").unwrap(),
            TransportMode::Transit
        );
        assert_eq!(TransportMode::parse("driving").unwrap(), TransportMode::Driving);
        assert_eq!(TransportMode::parse(" CAR/TAXI ").unwrap(), TransportMode::Driving);
    }

    #[test]
    fn parse_roundtrips_canonical_name() {
        for mode in TransportMode::ALL {
            assert_eq!(TransportMode::parse(mode.as_str()).unwrap(), mode);
            assert_eq!(TransportMode::parse(mode.display_name()).unwrap(), mode);
        }
    }

    #[test]
    fn reject_unknown() {
        let err = TransportMode::parse("cycling").unwrap_err();
        assert_eq!(err.to_string(), "unsupported transport mode: \"cycling\"");
    }

    #[test]
    fn serde_uses_canonical_name() {
        let json = serde_json::to_string(&TransportMode::Transit).unwrap();
        assert_eq!(json, "\"transit\"");

        let mode: TransportMode = serde_json::from_str("\"car/taxi\"").unwrap();
        assert_eq!(mode, TransportMode::Driving);
    }
}

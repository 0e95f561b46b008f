//! Domain types for the outing planner.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinate;
mod error;
mod itinerary;
mod mode;
mod place;

pub use coordinate::{Coordinate, CoordinateKey, InvalidCoordinate};
pub use error::DomainError;
pub use itinerary::{Itinerary, Leg, RouteStep, START_NAME, Stop, StopKind};
pub use mode::{InvalidTransportMode, TransportMode};
pub use place::{Place, PlaceCategory, PlaceId, PlaceSource};

/// Longest outing the planner accepts, in hours.
pub const MAX_DURATION_HOURS: f64 = 24.0;

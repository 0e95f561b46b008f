//! Travel-time lookup between coordinates.
//!
//! The planner depends on the [`Routing`] capability (an external directions
//! service) through [`TravelTimeProvider`], which adds caching, the transit
//! approximation, and the geometric fallback. The provider never fails: when
//! routing is unavailable the answer is estimated from distance and speed.

mod travel_time;

use std::future::Future;

use crate::domain::{Coordinate, RouteStep, TransportMode};

pub use travel_time::{RoutingConfig, TravelTimeCache, TravelTimeKey, TravelTimeProvider};

/// Error from a routing capability.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// Network failure talking to the routing service
    #[error("routing request failed: {0}")]
    Network(String),

    /// Service reported that no route exists
    #[error("no route found")]
    NoRoute,

    /// Quota exhausted or rate limited
    #[error("routing quota exceeded")]
    RateLimited,

    /// Credentials rejected
    #[error("routing service rejected credentials")]
    Unauthorized,

    /// Service answered with something we can't use
    #[error("malformed routing response: {0}")]
    Malformed(String),

    /// Mode not offered by this routing service
    #[error("transport mode {0} not supported")]
    UnsupportedMode(TransportMode),

    /// No answer within the allotted time
    #[error("routing request timed out")]
    Timeout,
}

/// A routed answer for one origin-destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingResult {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub steps: Vec<RouteStep>,
}

impl RoutingResult {
    /// Check the figures are usable: finite and non-negative.
    pub fn validate(self) -> Result<Self, RoutingError> {
        if !self.distance_meters.is_finite() || self.distance_meters < 0.0 {
            return Err(RoutingError::Malformed(format!(
                "distance {} is not a non-negative number",
                self.distance_meters
            )));
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(RoutingError::Malformed(format!(
                "duration {} is not a non-negative number",
                self.duration_seconds
            )));
        }
        Ok(self)
    }

    /// Duration rounded up to whole minutes.
    pub fn duration_minutes(&self) -> u32 {
        (self.duration_seconds / 60.0).ceil().max(0.0) as u32
    }
}

/// Trait for an external routing service.
///
/// This abstraction allows the planner to be tested with mock routing.
pub trait Routing {
    /// Whether the service can route `mode` natively.
    fn supports(&self, mode: TransportMode) -> bool;

    /// Route from `origin` to `destination`.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> impl Future<Output = Result<RoutingResult, RoutingError>> + Send;
}

/// Best-effort travel time between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTime {
    pub distance_meters: f64,
    pub travel_minutes: u32,
    pub steps: Vec<RouteStep>,
    /// True when approximated instead of routed.
    pub is_estimated: bool,
}

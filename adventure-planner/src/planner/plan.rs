//! The planning entry point.

use tracing::{info, warn};

use crate::domain::{Coordinate, DomainError, Itinerary, MAX_DURATION_HOURS, TransportMode};
use crate::places::{PlaceSearch, PlaceSearchProvider};
use crate::routing::{Routing, TravelTimeProvider};

use super::builder::ItineraryBuilder;
use super::candidates::CandidateLocationFinder;
use super::config::PlannerConfig;
use super::fallback::FallbackLocationGenerator;

/// Error from outing planning.
///
/// Only invalid input is an error. Provider trouble is absorbed into
/// estimated or synthetic results, and an outing that doesn't fit its
/// budget is an infeasible [`Itinerary`], not an `Err`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Request rejected before planning began
    #[error("invalid planning request: {0}")]
    InvalidRequest(#[from] DomainError),
}

/// Check request fields the type system doesn't already guarantee.
pub fn validate_request(city: &str, duration_hours: f64) -> Result<(), DomainError> {
    if !duration_hours.is_finite() || duration_hours <= 0.0 || duration_hours > MAX_DURATION_HOURS {
        return Err(DomainError::InvalidDuration(duration_hours));
    }
    if city.trim().is_empty() {
        return Err(DomainError::EmptyCity);
    }
    Ok(())
}

/// Outing planner.
///
/// Owns the travel-time and place-search providers; their caches are
/// shared with anything else holding a clone of the same cache.
pub struct Planner<R: Routing, S: PlaceSearch> {
    travel: TravelTimeProvider<R>,
    places: PlaceSearchProvider<S>,
    config: PlannerConfig,
}

impl<R: Routing, S: PlaceSearch> Planner<R, S> {
    /// Create a new planner.
    pub fn new(
        travel: TravelTimeProvider<R>,
        places: PlaceSearchProvider<S>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            travel,
            places,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn travel(&self) -> &TravelTimeProvider<R> {
        &self.travel
    }

    pub fn places(&self) -> &PlaceSearchProvider<S> {
        &self.places
    }

    /// Plan an outing from `start` lasting `duration_hours`.
    ///
    /// Real places are preferred; when search finds none, synthetic stops
    /// around the start are used instead and the itinerary says so.
    pub async fn plan_itinerary(
        &self,
        start: Coordinate,
        city: &str,
        duration_hours: f64,
        mode: TransportMode,
        preferences: &[String],
    ) -> Result<Itinerary, PlanError> {
        validate_request(city, duration_hours)?;

        info!(%start, city, duration_hours, %mode, ?preferences, "planning itinerary");

        let mut candidates = CandidateLocationFinder::new(&self.places, &self.config)
            .find(start, city, duration_hours, mode, preferences)
            .await;

        if candidates.is_empty() {
            warn!(city, %start, "no places found, using synthetic locations");
            candidates = FallbackLocationGenerator::new(&self.config).generate(
                start,
                city,
                duration_hours,
                mode,
            );
        }

        let itinerary = ItineraryBuilder::new(&self.travel, &self.config)
            .build(start, candidates, duration_hours, mode)
            .await;

        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validation() {
        assert!(validate_request("Lisbon", 2.0).is_ok());
        assert!(validate_request("Lisbon", 24.0).is_ok());
        assert_eq!(
            validate_request("Lisbon", 0.0),
            Err(DomainError::InvalidDuration(0.0))
        );
        assert!(validate_request("Lisbon", 24.5).is_err());
        assert!(validate_request("Lisbon", f64::NAN).is_err());
        assert_eq!(validate_request("  ", 2.0), Err(DomainError::EmptyCity));
    }

    #[test]
    fn error_display() {
        let err = PlanError::from(DomainError::EmptyCity);
        assert_eq!(err.to_string(), "invalid planning request: city must not be empty");
    }
}

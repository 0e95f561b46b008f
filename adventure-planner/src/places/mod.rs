//! Place search around a point.
//!
//! The planner depends on the [`PlaceSearch`] capability (an external
//! points-of-interest service) through [`PlaceSearchProvider`], which adds
//! caching, a per-call timeout, and a quality filter. Provider failures
//! become empty results so one failing category never aborts a search.

mod provider;

use std::future::Future;

use crate::domain::{Coordinate, Place, PlaceCategory};

pub use provider::{PlaceSearchCache, PlaceSearchConfig, PlaceSearchKey, PlaceSearchProvider};

/// Error from a place-search capability.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaceSearchError {
    /// Network failure talking to the search service
    #[error("place search request failed: {0}")]
    Network(String),

    /// Quota exhausted or rate limited
    #[error("place search quota exceeded")]
    RateLimited,

    /// Credentials rejected
    #[error("place search service rejected credentials")]
    Unauthorized,

    /// Service answered with something we can't use
    #[error("malformed place search response: {0}")]
    Malformed(String),

    /// No answer within the allotted time
    #[error("place search timed out")]
    Timeout,
}

/// A search for places of one category around a center.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub center: Coordinate,
    /// `None` searches for any kind of place.
    pub category: Option<PlaceCategory>,
    pub radius_meters: f64,
    /// City name, used by services that phrase searches as text.
    pub city: String,
}

impl PlaceQuery {
    /// Create a query.
    pub fn new(
        center: Coordinate,
        category: Option<PlaceCategory>,
        radius_meters: f64,
        city: impl Into<String>,
    ) -> Self {
        Self {
            center,
            category,
            radius_meters,
            city: city.into(),
        }
    }
}

/// Trait for an external place-search service.
///
/// This abstraction allows the planner to be tested with mock places.
pub trait PlaceSearch {
    /// Find places matching `query`, restricted to its radius.
    fn query(
        &self,
        query: &PlaceQuery,
    ) -> impl Future<Output = Result<Vec<Place>, PlaceSearchError>> + Send;
}

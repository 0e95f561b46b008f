//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::places::PlaceSearch;
use crate::planner::Planner;
use crate::routing::Routing;

/// Default ceiling on one planning request.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state.
pub struct AppState<R: Routing, S: PlaceSearch> {
    /// Outing planner, with its provider caches
    pub planner: Arc<Planner<R, S>>,

    /// Planning requests running longer than this are abandoned
    pub request_timeout: Duration,
}

impl<R: Routing, S: PlaceSearch> AppState<R, S> {
    /// Create a new app state.
    pub fn new(planner: Planner<R, S>) -> Self {
        Self {
            planner: Arc::new(planner),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the per-request planning timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// Manual impl: deriving would require `R: Clone` and `S: Clone`.
impl<R: Routing, S: PlaceSearch> Clone for AppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
            request_timeout: self.request_timeout,
        }
    }
}

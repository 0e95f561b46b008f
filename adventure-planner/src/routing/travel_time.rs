//! Cached travel-time provider with transit approximation and geometric fallback.

use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::domain::{Coordinate, CoordinateKey, TransportMode};
use crate::geo;

use super::{Routing, RoutingError, RoutingResult, TravelTime};

/// Cache key: rounded origin, rounded destination, mode.
pub type TravelTimeKey = (CoordinateKey, CoordinateKey, TransportMode);

/// Shared cache of travel-time answers.
pub type TravelTimeCache = TtlCache<TravelTimeKey, TravelTime>;

/// Configuration for travel-time lookups.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Multiplier applied to a walking route to approximate transit when the
    /// routing service has no transit support.
    pub transit_speedup: f64,

    /// Maximum time to wait for one routing call.
    pub call_timeout: Duration,

    /// Decimal places kept when rounding coordinates into cache keys.
    pub coordinate_precision: u32,
}

impl RoutingConfig {
    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Set the cache key precision.
    pub fn with_coordinate_precision(mut self, precision: u32) -> Self {
        self.coordinate_precision = precision;
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            transit_speedup: 0.5,
            call_timeout: Duration::from_secs(10),
            coordinate_precision: 5,
        }
    }
}

/// Travel-time lookups that always produce an answer.
pub struct TravelTimeProvider<R: Routing> {
    routing: R,
    cache: TravelTimeCache,
    config: RoutingConfig,
}

impl<R: Routing> TravelTimeProvider<R> {
    /// Create a provider over `routing`, sharing `cache` with other providers.
    pub fn new(routing: R, cache: TravelTimeCache, config: RoutingConfig) -> Self {
        Self {
            routing,
            cache,
            config,
        }
    }

    /// Access the underlying routing service.
    pub fn routing(&self) -> &R {
        &self.routing
    }

    /// Travel time from `origin` to `destination` by `mode`.
    ///
    /// Never fails. Cached answers are returned as-is; on a miss the routing
    /// service is asked, and any failure falls back to a distance/speed
    /// estimate with `is_estimated` set. Fallback answers are cached too, so
    /// a failing pair isn't retried within the TTL.
    pub async fn get_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> TravelTime {
        let precision = self.config.coordinate_precision;
        let key = (
            origin.rounded_key(precision),
            destination.rounded_key(precision),
            mode,
        );

        if let Some(cached) = self.cache.get(&key).await {
            debug!(%origin, %destination, %mode, "travel time cache hit");
            return cached;
        }

        let result = match self.lookup(origin, destination, mode).await {
            Ok(travel) => travel,
            Err(e) => {
                warn!(
                    %origin,
                    %destination,
                    %mode,
                    error = %e,
                    "routing failed, estimating travel time from distance"
                );
                Self::estimate(origin, destination, mode)
            }
        };

        self.cache.insert(key, result.clone()).await;
        result
    }

    /// Ask the routing service, approximating transit from walking if needed.
    async fn lookup(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<TravelTime, RoutingError> {
        if self.routing.supports(mode) {
            let routed = self.call(origin, destination, mode).await?;
            return Ok(TravelTime {
                distance_meters: routed.distance_meters,
                travel_minutes: routed.duration_minutes(),
                steps: routed.steps,
                is_estimated: false,
            });
        }

        if mode == TransportMode::Transit && self.routing.supports(TransportMode::Walking) {
            let walked = self
                .call(origin, destination, TransportMode::Walking)
                .await?;
            let minutes =
                (f64::from(walked.duration_minutes()) * self.config.transit_speedup).ceil();
            debug!(
                %origin,
                %destination,
                walking_minutes = walked.duration_minutes(),
                "approximating transit from walking route"
            );
            return Ok(TravelTime {
                distance_meters: walked.distance_meters,
                travel_minutes: minutes.max(0.0) as u32,
                steps: walked.steps,
                is_estimated: true,
            });
        }

        Err(RoutingError::UnsupportedMode(mode))
    }

    /// One bounded routing call with its answer checked.
    async fn call(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<RoutingResult, RoutingError> {
        tokio::time::timeout(
            self.config.call_timeout,
            self.routing.route(origin, destination, mode),
        )
        .await
        .map_err(|_| RoutingError::Timeout)?
        .and_then(RoutingResult::validate)
    }

    /// Distance/speed estimate used when routing is unavailable.
    fn estimate(origin: Coordinate, destination: Coordinate, mode: TransportMode) -> TravelTime {
        TravelTime {
            distance_meters: geo::distance_meters(origin, destination),
            travel_minutes: geo::estimate_travel_minutes(origin, destination, mode),
            steps: Vec::new(),
            is_estimated: true,
        }
    }
}

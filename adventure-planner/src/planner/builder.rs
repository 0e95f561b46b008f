//! Greedy itinerary construction under a time budget.
//!
//! Candidates are tried nearest-first (straight-line). Each one is appended
//! and the whole route re-validated; the first candidate that breaks the
//! budget is dropped and growth stops there; later candidates are not tried.

use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::{Coordinate, Itinerary, Leg, Place, PlaceSource, Stop, TransportMode};
use crate::geo;
use crate::routing::{Routing, TravelTimeProvider};

use super::allocate::allocate_time;
use super::config::PlannerConfig;

/// Number of stops to aim for, start excluded.
pub fn target_stops(duration_hours: f64) -> usize {
    if duration_hours <= 1.0 {
        2
    } else if duration_hours <= 3.0 {
        3
    } else if duration_hours <= 5.0 {
        4
    } else {
        5
    }
}

/// Whole minutes in `duration_hours`.
pub fn budget_minutes(duration_hours: f64) -> u32 {
    (duration_hours.max(0.0) * 60.0).round() as u32
}

/// Outcome of checking a stop sequence against the budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub legs: Vec<Leg>,
    pub total_travel_minutes: u32,
    pub remaining_minutes: i64,
    pub is_feasible: bool,
}

/// Builds itineraries from candidate places.
pub struct ItineraryBuilder<'a, R: Routing> {
    travel: &'a TravelTimeProvider<R>,
    config: &'a PlannerConfig,
}

impl<'a, R: Routing> ItineraryBuilder<'a, R> {
    pub fn new(travel: &'a TravelTimeProvider<R>, config: &'a PlannerConfig) -> Self {
        Self { travel, config }
    }

    /// Build an itinerary starting at `start`.
    ///
    /// Never fails: when not even one candidate fits, the itinerary holds
    /// only the start and `is_feasible` is false.
    pub async fn build(
        &self,
        start: Coordinate,
        candidates: Vec<Place>,
        duration_hours: f64,
        mode: TransportMode,
    ) -> Itinerary {
        let budget = budget_minutes(duration_hours);
        let target = target_stops(duration_hours);

        let mut candidates = candidates;
        candidates.sort_by(|a, b| {
            geo::distance_meters(start, a.coordinate)
                .total_cmp(&geo::distance_meters(start, b.coordinate))
        });

        let mut sequence = vec![Stop::start(start)];
        for candidate in candidates {
            if sequence.len() - 1 >= target {
                break;
            }
            sequence.push(Stop::at_place(candidate));
            let check = self.validate(&sequence, mode, budget).await;
            if !check.is_feasible {
                let dropped = sequence.pop();
                debug!(
                    stop = dropped.as_ref().map(|s| s.name.as_str()).unwrap_or_default(),
                    remaining = check.remaining_minutes,
                    "stop breaks the time budget, ending selection"
                );
                break;
            }
        }

        let settled = self.validate(&sequence, mode, budget).await;
        let stops = allocate_time(
            sequence,
            &settled.legs,
            budget,
            self.config.min_minutes_per_stop,
        );

        let visits = stops.len() - 1;
        let is_feasible = settled.is_feasible && visits > 0;
        let uses_synthetic_locations = stops
            .iter()
            .filter_map(Stop::place)
            .any(|p| p.source == PlaceSource::Synthetic);

        info!(
            visits,
            target,
            budget,
            travel = settled.total_travel_minutes,
            is_feasible,
            "itinerary built"
        );

        Itinerary {
            stops,
            legs: settled.legs,
            total_travel_minutes: settled.total_travel_minutes,
            remaining_minutes: settled.remaining_minutes,
            is_feasible,
            transport_mode: mode,
            budget_minutes: budget,
            uses_synthetic_locations,
        }
    }

    /// Travel legs for `sequence` and whether it fits `budget` with the
    /// dwell floor at every stop (start included).
    ///
    /// Legs are looked up concurrently and returned in route order.
    pub async fn validate(
        &self,
        sequence: &[Stop],
        mode: TransportMode,
        budget: u32,
    ) -> Validation {
        let lookups: Vec<_> = sequence
            .windows(2)
            .map(|pair| async move {
                let (from, to) = (&pair[0], &pair[1]);
                let t = self
                    .travel
                    .get_travel_time(from.coordinate, to.coordinate, mode)
                    .await;
                Leg {
                    origin_name: from.name.clone(),
                    dest_name: to.name.clone(),
                    travel_minutes: t.travel_minutes,
                    distance_meters: t.distance_meters,
                    is_estimated: t.is_estimated,
                    steps: t.steps,
                }
            })
            .collect();
        let legs = join_all(lookups).await;

        let total: u32 = legs
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.travel_minutes));
        let remaining = i64::from(budget) - i64::from(total);
        let floor = sequence.len() as i64 * i64::from(self.config.min_minutes_per_stop);

        Validation {
            legs,
            total_travel_minutes: total,
            remaining_minutes: remaining,
            is_feasible: remaining >= floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, TtlCache};
    use crate::routing::{RoutingConfig, RoutingError, RoutingResult};
    use std::collections::HashMap;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn start() -> Coordinate {
        c(0.0, 0.0)
    }

    /// Routing stub: minutes by destination longitude (×1000), default 5.
    #[derive(Default)]
    struct ByDestination {
        minutes: HashMap<i64, f64>,
    }

    impl Routing for ByDestination {
        fn supports(&self, _mode: TransportMode) -> bool {
            true
        }

        async fn route(
            &self,
            _origin: Coordinate,
            destination: Coordinate,
            _mode: TransportMode,
        ) -> Result<RoutingResult, RoutingError> {
            let key = (destination.longitude() * 1000.0).round() as i64;
            let minutes = self.minutes.get(&key).copied().unwrap_or(5.0);
            Ok(RoutingResult {
                distance_meters: 500.0,
                duration_seconds: minutes * 60.0,
                steps: vec![],
            })
        }
    }

    fn provider(routing: ByDestination) -> TravelTimeProvider<ByDestination> {
        TravelTimeProvider::new(
            routing,
            TtlCache::new(&CacheConfig::default()),
            RoutingConfig::default(),
        )
    }

    /// Candidate `i` sits `i` thousandths of a degree east of the start.
    fn candidate(i: u32) -> Place {
        Place::new(format!("p{i}"), format!("Place {i}"), c(0.0, f64::from(i) / 1000.0))
    }

    #[test]
    fn target_step_function() {
        assert_eq!(target_stops(0.5), 2);
        assert_eq!(target_stops(1.0), 2);
        assert_eq!(target_stops(1.5), 3);
        assert_eq!(target_stops(3.0), 3);
        assert_eq!(target_stops(5.0), 4);
        assert_eq!(target_stops(5.1), 5);
        assert_eq!(target_stops(12.0), 5);
    }

    #[test]
    fn budget_rounds() {
        assert_eq!(budget_minutes(2.0), 120);
        assert_eq!(budget_minutes(0.25), 15);
        assert_eq!(budget_minutes(1.0 / 3.0), 20);
    }

    #[tokio::test]
    async fn picks_nearest_up_to_target() {
        let travel = provider(ByDestination::default());
        let config = PlannerConfig::default();
        let builder = ItineraryBuilder::new(&travel, &config);

        let candidates = vec![candidate(5), candidate(1), candidate(4), candidate(2), candidate(3)];
        let it = builder
            .build(start(), candidates, 2.0, TransportMode::Walking)
            .await;

        let names: Vec<_> = it.stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Starting Point", "Place 1", "Place 2", "Place 3"]);
        assert_eq!(it.legs.len(), 3);
        assert!(it.is_feasible);
        assert_eq!(it.total_travel_minutes, 15);
        assert_eq!(it.remaining_minutes, 105);
        assert!(!it.uses_synthetic_locations);
    }

    #[tokio::test]
    async fn hard_stop_on_first_failure() {
        let mut routing = ByDestination::default();
        routing.minutes.insert(2, 200.0);
        let travel = provider(routing);
        let config = PlannerConfig::default();
        let builder = ItineraryBuilder::new(&travel, &config);

        // Place 2 is too slow to reach; Place 3 would fit but is never tried.
        let it = builder
            .build(
                start(),
                vec![candidate(1), candidate(2), candidate(3)],
                2.0,
                TransportMode::Walking,
            )
            .await;

        assert_eq!(it.visit_count(), 1);
        assert_eq!(it.stops[1].name, "Place 1");
        assert!(it.is_feasible);
    }

    #[tokio::test]
    async fn no_candidates_is_infeasible() {
        let travel = provider(ByDestination::default());
        let config = PlannerConfig::default();
        let it = ItineraryBuilder::new(&travel, &config)
            .build(start(), vec![], 3.0, TransportMode::Driving)
            .await;

        assert_eq!(it.stops.len(), 1);
        assert!(it.legs.is_empty());
        assert!(!it.is_feasible);
        assert_eq!(it.remaining_minutes, 180);
    }

    #[tokio::test]
    async fn validate_totals_legs() {
        let mut routing = ByDestination::default();
        routing.minutes.insert(1, 12.0);
        routing.minutes.insert(2, 30.0);
        let travel = provider(routing);
        let config = PlannerConfig::default();
        let builder = ItineraryBuilder::new(&travel, &config);

        let seq = vec![
            Stop::start(start()),
            Stop::at_place(candidate(1)),
            Stop::at_place(candidate(2)),
        ];
        let v = builder.validate(&seq, TransportMode::Walking, 70).await;

        assert_eq!(v.legs.len(), 2);
        assert_eq!(v.legs[0].dest_name, "Place 1");
        assert_eq!(v.legs[1].origin_name, "Place 1");
        assert_eq!(v.total_travel_minutes, 42);
        assert_eq!(v.remaining_minutes, 28);
        // 28 < 3 × 10
        assert!(!v.is_feasible);
    }

    #[tokio::test]
    async fn validate_is_idempotent() {
        let travel = provider(ByDestination::default());
        let config = PlannerConfig::default();
        let builder = ItineraryBuilder::new(&travel, &config);
        let seq = vec![Stop::start(start()), Stop::at_place(candidate(3))];

        let a = builder.validate(&seq, TransportMode::Transit, 60).await;
        let b = builder.validate(&seq, TransportMode::Transit, 60).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn synthetic_flag_carried() {
        let travel = provider(ByDestination::default());
        let config = PlannerConfig::default();
        let it = ItineraryBuilder::new(&travel, &config)
            .build(
                start(),
                vec![candidate(1).synthetic()],
                1.0,
                TransportMode::Walking,
            )
            .await;
        assert!(it.uses_synthetic_locations);
    }
}

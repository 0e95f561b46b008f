//! Itinerary types: legs, stops and the assembled plan.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Place, TransportMode};

/// One turn-by-turn instruction within a routed leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// The travel segment between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub origin_name: String,
    pub dest_name: String,
    pub travel_minutes: u32,
    pub distance_meters: f64,
    /// True when the figures come from an approximation rather than a routed answer.
    pub is_estimated: bool,
    pub steps: Vec<RouteStep>,
}

/// What a stop stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopKind {
    /// The traveller's starting point.
    Start,
    /// A real or synthetic place.
    Place { place: Place },
}

/// A stop in the itinerary with its dwell time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(flatten)]
    pub kind: StopKind,
    pub time_to_spend_minutes: u32,
    pub travel_time_to_next_minutes: u32,
}

/// Name given to the start stop.
pub const START_NAME: &str = "Starting Point";

impl Stop {
    /// The traveller's starting point.
    pub fn start(coordinate: Coordinate) -> Self {
        Self {
            name: START_NAME.to_string(),
            coordinate,
            kind: StopKind::Start,
            time_to_spend_minutes: 0,
            travel_time_to_next_minutes: 0,
        }
    }

    /// A stop at a place, with no time allocated yet.
    pub fn at_place(place: Place) -> Self {
        Self {
            name: place.name.clone(),
            coordinate: place.coordinate,
            kind: StopKind::Place { place },
            time_to_spend_minutes: 0,
            travel_time_to_next_minutes: 0,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self.kind, StopKind::Start)
    }

    pub fn place(&self) -> Option<&Place> {
        match &self.kind {
            StopKind::Start => None,
            StopKind::Place { place } => Some(place),
        }
    }
}

/// A planned outing.
///
/// `stops[0]` is always the start; `legs.len() == stops.len() - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub stops: Vec<Stop>,
    pub legs: Vec<Leg>,
    pub total_travel_minutes: u32,
    /// Budget minus travel. Negative when travel alone exceeds the budget.
    pub remaining_minutes: i64,
    pub is_feasible: bool,
    pub transport_mode: TransportMode,
    pub budget_minutes: u32,
    /// True when the stops were synthesised because no real places were found.
    pub uses_synthetic_locations: bool,
}

impl Itinerary {
    /// Number of stops excluding the start.
    pub fn visit_count(&self) -> usize {
        self.stops.iter().filter(|s| !s.is_start()).count()
    }

    /// Total dwell time across all stops.
    pub fn total_dwell_minutes(&self) -> u32 {
        self.stops.iter().map(|s| s.time_to_spend_minutes).sum()
    }

    /// True if any leg relied on an estimate.
    pub fn has_estimated_legs(&self) -> bool {
        self.legs.iter().any(|l| l.is_estimated)
    }
}

//! Outing planner.
//!
//! This module answers: "starting here, with this much time and this way of
//! getting around, where should I go?"
//!
//! Candidate places are found by tiered category search, then stops are
//! chosen greedily nearest-first while the route still fits the budget, and
//! the leftover time is shared out as dwell time. When search finds nothing,
//! synthetic stops around the start stand in for real places.

mod allocate;
mod builder;
mod candidates;
mod config;
mod fallback;
mod plan;


pub use allocate::allocate_time;
pub use builder::{ItineraryBuilder, Validation, budget_minutes, target_stops};
pub use candidates::{CandidateLocationFinder, primary_categories};
pub use config::{PerMode, PlannerConfig, TierRule};
pub use fallback::FallbackLocationGenerator;
pub use plan::{PlanError, Planner, validate_request};

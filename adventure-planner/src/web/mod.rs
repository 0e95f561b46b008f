//! Web layer for the outing planner.
//!
//! Provides JSON endpoints for checking service status and planning
//! itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

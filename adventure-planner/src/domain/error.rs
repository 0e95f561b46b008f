//! Domain error types.
//!
//! These errors represent invalid planning input. They are distinct from
//! provider failures, which are absorbed into estimated or fallback results.

use super::{InvalidCoordinate, InvalidTransportMode};

/// Domain-level errors for validating a planning request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Start point outside the valid coordinate range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Transport mode not recognised
    #[error(transparent)]
    InvalidTransportMode(#[from] InvalidTransportMode),

    /// Duration is zero, negative, not finite, or too long to plan
    #[error("invalid duration: {0} hours (must be greater than 0 and at most {max})", max = super::MAX_DURATION_HOURS)]
    InvalidDuration(f64),

    /// City name missing
    #[error("city must not be empty")]
    EmptyCity,
}

//! HTTP route handlers.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};

use crate::domain::{DomainError, TransportMode};
use crate::places::PlaceSearch;
use crate::planner::PlanError;
use crate::routing::Routing;

use super::dto::*;
use super::state::AppState;

/// Preferences the planner understands.
const SUPPORTED_PREFERENCES: &[&str] = &[
    "museums",
    "parks",
    "historical",
    "food",
    "shopping",
    "entertainment",
    "cultural",
    "nature",
];

/// Create the application router.
pub fn create_router<R, S>(state: AppState<R, S>) -> Router
where
    R: Routing + Send + Sync + 'static,
    S: PlaceSearch + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status))
        .route("/api/itinerary/plan", post(plan_itinerary::<R, S>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Supported modes and preferences.
async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
        supported_transport_modes: TransportMode::ALL.iter().map(|m| m.display_name()).collect(),
        supported_preferences: SUPPORTED_PREFERENCES.to_vec(),
    })
}

/// Plan an itinerary.
async fn plan_itinerary<R, S>(
    State(state): State<AppState<R, S>>,
    Json(req): Json<PlanItineraryRequest>,
) -> Result<Json<PlanItineraryResponse>, AppError>
where
    R: Routing + Send + Sync + 'static,
    S: PlaceSearch + Send + Sync + 'static,
{
    let started = Instant::now();
    let (start, mode) = req.parse()?;

    let planning = state.planner.plan_itinerary(
        start,
        &req.city,
        req.duration_hours,
        mode,
        &req.preferences,
    );
    let itinerary = tokio::time::timeout(state.request_timeout, planning)
        .await
        .map_err(|_| AppError::Timeout)??;

    let elapsed = started.elapsed();
    info!(
        city = %req.city,
        stops = itinerary.visit_count(),
        feasible = itinerary.is_feasible,
        elapsed_ms = elapsed.as_millis() as u64,
        "itinerary planned"
    );

    Ok(Json(PlanItineraryResponse {
        itinerary: ItineraryResult::from_itinerary(&itinerary),
        metadata: PlanMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            generation_time_ms: elapsed.as_millis() as u64,
            search_radius_meters: state
                .planner
                .config()
                .search_radius(req.duration_hours, mode),
        },
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Timeout,
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(inner) => inner.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "planning took too long; try again".to_string(),
            ),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

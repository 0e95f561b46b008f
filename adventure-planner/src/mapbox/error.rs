//! Mapbox client error types.

use std::fmt;

use crate::places::PlaceSearchError;
use crate::routing::RoutingError;

/// Errors from the Mapbox HTTP client.
#[derive(Debug)]
pub enum MapboxError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization or conversion failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Directions found no route between the points
    NoRoute,

    /// Rate limited by the API
    RateLimited,

    /// Invalid access token
    Unauthorized,

    /// Client or fixture setup problem
    NotConfigured(String),
}

impl fmt::Display for MapboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapboxError::Http(e) => write!(f, "HTTP error: {e}"),
            MapboxError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            MapboxError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            MapboxError::NoRoute => write!(f, "no route between the requested points"),
            MapboxError::RateLimited => write!(f, "rate limited by Mapbox API"),
            MapboxError::Unauthorized => write!(f, "unauthorized (invalid access token)"),
            MapboxError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for MapboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapboxError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MapboxError {
    fn from(err: reqwest::Error) -> Self {
        MapboxError::Http(err)
    }
}

impl From<MapboxError> for RoutingError {
    fn from(err: MapboxError) -> Self {
        match err {
            MapboxError::Http(e) if e.is_timeout() => RoutingError::Timeout,
            MapboxError::NoRoute => RoutingError::NoRoute,
            MapboxError::RateLimited => RoutingError::RateLimited,
            MapboxError::Unauthorized => RoutingError::Unauthorized,
            MapboxError::Json { message, .. } => RoutingError::Malformed(message),
            other => RoutingError::Network(other.to_string()),
        }
    }
}

impl From<MapboxError> for PlaceSearchError {
    fn from(err: MapboxError) -> Self {
        match err {
            MapboxError::Http(e) if e.is_timeout() => PlaceSearchError::Timeout,
            MapboxError::RateLimited => PlaceSearchError::RateLimited,
            MapboxError::Unauthorized => PlaceSearchError::Unauthorized,
            MapboxError::Json { message, .. } => PlaceSearchError::Malformed(message),
            other => PlaceSearchError::Network(other.to_string()),
        }
    }
}

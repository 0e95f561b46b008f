//! Mapbox HTTP client.
//!
//! Implements [`Routing`] over the Directions API and [`PlaceSearch`] over
//! the Search Box API (`suggest` followed by `retrieve` per suggestion).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, Place, PlaceCategory, TransportMode};
use crate::places::{PlaceQuery, PlaceSearch, PlaceSearchError};
use crate::routing::{Routing, RoutingError, RoutingResult};

use super::convert::{bounding_box, convert_directions, convert_feature, search_phrase};
use super::error::MapboxError;
use super::types::{DirectionsResponse, RetrieveResponse, SuggestResponse};

/// Default base URL for the Mapbox APIs.
const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Suggestions requested per search.
const SUGGEST_LIMIT: usize = 10;

/// Suggestions retrieved in detail per search.
const DETAILS_LIMIT: usize = 5;

/// Configuration for the Mapbox client.
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    /// Access token sent as a query parameter
    pub access_token: String,
    /// Base URL for the API (defaults to production Mapbox)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapboxConfig {
    /// Create a new config with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Mapbox API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
    semaphore: Arc<Semaphore>,
    sessions: Arc<AtomicU64>,
}

impl MapboxClient {
    /// Create a new Mapbox client with the given configuration.
    pub fn new(config: MapboxConfig) -> Result<Self, MapboxError> {
        if config.access_token.trim().is_empty() {
            return Err(MapboxError::NotConfigured(
                "Mapbox access token is empty".to_string(),
            ));
        }

        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                MapboxError::NotConfigured(format!("invalid base URL: {}", config.base_url))
            })?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            access_token: config.access_token,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            sessions: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Route between two points with a Mapbox profile.
    pub async fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<RoutingResult, MapboxError> {
        let profile = profile_for(mode).ok_or_else(|| {
            MapboxError::NotConfigured(format!("no Mapbox profile for {mode}"))
        })?;

        let waypoints = format!(
            "{},{};{},{}",
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude(),
        );
        let url = self.endpoint(&["directions", "v5", "mapbox", profile, waypoints.as_str()])?;

        let (status, body) = self
            .get(
                url,
                &[
                    ("access_token", self.access_token.clone()),
                    ("geometries", "geojson".to_string()),
                    ("steps", "true".to_string()),
                ],
            )
            .await?;

        // NoRoute may come with an error status and a JSON body.
        if !status.is_success() {
            return match serde_json::from_str::<DirectionsResponse>(&body) {
                Ok(resp) if resp.code == "NoRoute" => Err(MapboxError::NoRoute),
                _ => Err(MapboxError::ApiError {
                    status: status.as_u16(),
                    message: body,
                }),
            };
        }

        let resp: DirectionsResponse = decode(&body)?;
        if resp.code == "NoRoute" {
            return Err(MapboxError::NoRoute);
        }

        convert_directions(resp).map_err(|e| MapboxError::Json {
            message: e.to_string(),
            body: None,
        })
    }

    /// Search for places, retrieving details for the leading suggestions.
    ///
    /// A suggestion whose details can't be fetched or converted is skipped.
    pub async fn search_places(&self, query: &PlaceQuery) -> Result<Vec<Place>, MapboxError> {
        let session = self.session_token();
        let url = self.endpoint(&["search", "searchbox", "v1", "suggest"])?;

        let suggestions: SuggestResponse = self
            .get_json(
                url,
                &[
                    ("q", search_phrase(query.category, &query.city)),
                    ("access_token", self.access_token.clone()),
                    ("session_token", session.clone()),
                    (
                        "proximity",
                        format!("{},{}", query.center.longitude(), query.center.latitude()),
                    ),
                    ("bbox", bounding_box(query.center, query.radius_meters)),
                    ("limit", SUGGEST_LIMIT.to_string()),
                    ("types", "poi".to_string()),
                    ("language", "en".to_string()),
                ],
            )
            .await?;

        let retrievals: Vec<_> = suggestions
            .suggestions
            .iter()
            .take(DETAILS_LIMIT)
            .map(|s| self.retrieve(&s.mapbox_id, &session, query.category))
            .collect();

        let mut places = Vec::new();
        for (suggestion, result) in suggestions
            .suggestions
            .iter()
            .zip(join_all(retrievals).await)
        {
            match result {
                Ok(Some(place)) => places.push(place),
                Ok(None) => {}
                Err(e) => debug!(
                    mapbox_id = %suggestion.mapbox_id,
                    error = %e,
                    "skipping suggestion without usable details"
                ),
            }
        }

        Ok(places)
    }

    /// Retrieve one suggestion's details.
    async fn retrieve(
        &self,
        mapbox_id: &str,
        session: &str,
        queried: Option<PlaceCategory>,
    ) -> Result<Option<Place>, MapboxError> {
        let url = self.endpoint(&["search", "searchbox", "v1", "retrieve", mapbox_id])?;
        let resp: RetrieveResponse = self
            .get_json(
                url,
                &[
                    ("access_token", self.access_token.clone()),
                    ("session_token", session.to_string()),
                ],
            )
            .await?;

        match resp.features.into_iter().next() {
            Some(feature) => convert_feature(feature, queried)
                .map(Some)
                .map_err(|e| MapboxError::Json {
                    message: e.to_string(),
                    body: None,
                }),
            None => Ok(None),
        }
    }

    /// API URL for `segments` under the base URL, each segment escaped.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, MapboxError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                MapboxError::NotConfigured(format!("invalid base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the JSON body; any non-2xx status is an error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, MapboxError> {
        let (status, body) = self.get(url, params).await?;

        if !status.is_success() {
            return Err(MapboxError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        decode(&body)
    }

    /// GET `url`, returning the status and body text.
    ///
    /// Auth and rate-limit statuses are mapped here; other statuses are
    /// left for the caller.
    async fn get(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<(StatusCode, String), MapboxError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapboxError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(MapboxError::Unauthorized);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MapboxError::RateLimited);
        }

        let body = response.text().await?;
        Ok((status, body))
    }

    /// A fresh Search Box session token.
    fn session_token(&self) -> String {
        let n = self.sessions.fetch_add(1, Ordering::Relaxed);
        format!("session_{}_{n}", chrono::Utc::now().timestamp_millis())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, MapboxError> {
    serde_json::from_str(body).map_err(|e| MapboxError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

/// Mapbox Directions profile (under `mapbox/`) for a mode; transit has none.
fn profile_for(mode: TransportMode) -> Option<&'static str> {
    match mode {
        TransportMode::Walking => Some("walking"),
        TransportMode::Driving => Some("driving-traffic"),
        TransportMode::Transit => None,
    }
}

impl Routing for MapboxClient {
    fn supports(&self, mode: TransportMode) -> bool {
        profile_for(mode).is_some()
    }

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<RoutingResult, RoutingError> {
        Ok(self.directions(origin, destination, mode).await?)
    }
}

impl PlaceSearch for MapboxClient {
    async fn query(&self, query: &PlaceQuery) -> Result<Vec<Place>, PlaceSearchError> {
        Ok(self.search_places(query).await?)
    }
}

//! Mock Mapbox client for running without an access token.
//!
//! Loads place fixtures from JSON files and serves them as if they were
//! live search results. Routes are straight lines at the mode's average
//! speed, so the planner exercises the same code paths it does live.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{Coordinate, Place, PlaceCategory, TransportMode};
use crate::geo;
use crate::places::{PlaceQuery, PlaceSearch, PlaceSearchError};
use crate::routing::{Routing, RoutingError, RoutingResult};

use super::convert::convert_feature;
use super::error::MapboxError;
use super::types::RetrieveResponse;

/// Fixture file stem for searches without a category.
const ANY_STEM: &str = "any";

/// Mock Mapbox client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockMapboxClient {
    /// Pre-loaded places, keyed by searched category.
    places: Arc<HashMap<Option<PlaceCategory>, Vec<Place>>>,
}

impl MockMapboxClient {
    /// Create a mock client by loading JSON files from a directory.
    ///
    /// Expects `retrieve`-shaped feature collections named `{category}.json`
    /// (e.g. `museum.json`, `park.json`) plus an optional `any.json` for
    /// uncategorised searches.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MapboxError> {
        let data_dir = data_dir.as_ref();
        let mut places = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            MapboxError::NotConfigured(format!("failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                MapboxError::NotConfigured(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| MapboxError::NotConfigured(format!("invalid filename: {path:?}")))?;
            let category = parse_stem(stem).ok_or_else(|| {
                MapboxError::NotConfigured(format!("unknown category in filename: {stem}"))
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| {
                MapboxError::NotConfigured(format!("failed to read {path:?}: {e}"))
            })?;
            let resp: RetrieveResponse =
                serde_json::from_str(&json).map_err(|e| MapboxError::Json {
                    message: format!("failed to parse {path:?}: {e}"),
                    body: None,
                })?;

            let converted = resp
                .features
                .into_iter()
                .map(|f| convert_feature(f, category))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| MapboxError::Json {
                    message: format!("invalid feature in {path:?}: {e}"),
                    body: None,
                })?;

            places.insert(category, converted);
        }

        if places.is_empty() {
            return Err(MapboxError::NotConfigured(format!(
                "no mock place files found in {data_dir:?}"
            )));
        }

        Ok(Self {
            places: Arc::new(places),
        })
    }

    /// Categories with fixtures loaded; `None` is the uncategorised set.
    pub fn available_categories(&self) -> Vec<Option<PlaceCategory>> {
        let mut categories: Vec<_> = self.places.keys().copied().collect();
        categories.sort();
        categories
    }
}

fn parse_stem(stem: &str) -> Option<Option<PlaceCategory>> {
    if stem == ANY_STEM {
        return Some(None);
    }
    serde_json::from_value(serde_json::Value::String(stem.to_string()))
        .ok()
        .map(Some)
}

impl PlaceSearch for MockMapboxClient {
    /// Fixture places for the query's category within its radius.
    async fn query(&self, query: &PlaceQuery) -> Result<Vec<Place>, PlaceSearchError> {
        let found: Vec<Place> = self
            .places
            .get(&query.category)
            .map(|places| {
                places
                    .iter()
                    .filter(|p| geo::distance_meters(query.center, p.coordinate) <= query.radius_meters)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(found)
    }
}

impl Routing for MockMapboxClient {
    fn supports(&self, mode: TransportMode) -> bool {
        mode != TransportMode::Transit
    }

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<RoutingResult, RoutingError> {
        if !self.supports(mode) {
            return Err(RoutingError::UnsupportedMode(mode));
        }
        let distance_meters = geo::distance_meters(origin, destination);
        let meters_per_second = geo::speed_kmh(mode) * 1000.0 / 3600.0;
        Ok(RoutingResult {
            distance_meters,
            duration_seconds: distance_meters / meters_per_second,
            steps: Vec::new(),
        })
    }
}

//! Mapbox API response types.
//!
//! These mirror the JSON the Directions and Search Box APIs return. Fields
//! the planner needs are required; everything else is optional so that
//! unrelated API additions don't break parsing. Conversion into domain
//! types happens in `convert`, which rejects anything incomplete.

use serde::Deserialize;

/// Directions API response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// "Ok" on success; otherwise an error code such as "NoRoute".
    pub code: String,

    /// Human-readable error detail, when `code` isn't "Ok".
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Meters.
    pub distance: f64,

    /// Seconds.
    pub duration: f64,

    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// A leg between two waypoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    #[serde(default)]
    pub steps: Vec<RouteStepDto>,
}

/// A single maneuver.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStepDto {
    pub distance: f64,
    pub duration: f64,
    pub maneuver: Maneuver,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Maneuver {
    #[serde(default)]
    pub instruction: Option<String>,
}

/// Search Box `suggest` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// A search suggestion; details come from `retrieve`.
#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    pub mapbox_id: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// Search Box `retrieve` response (a GeoJSON feature collection).
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

/// GeoJSON point geometry: `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureProperties {
    pub mapbox_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub full_address: Option<String>,

    #[serde(default)]
    pub place_formatted: Option<String>,

    #[serde(default)]
    pub poi_category: Vec<String>,

    #[serde(default)]
    pub metadata: Option<FeatureMetadata>,
}

/// Optional enrichment some features carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureMetadata {
    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub review_count: Option<u32>,
}

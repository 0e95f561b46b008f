//! Conversion from Mapbox responses to domain types.
//!
//! Partial or inconsistent payloads are rejected here, at the boundary,
//! rather than propagated into the planner.

use crate::domain::{Coordinate, Place, PlaceCategory, RouteStep};
use crate::geo;
use crate::routing::RoutingResult;

use super::types::{DirectionsResponse, Feature};

/// Rating assumed for features Mapbox returns without one.
pub const DEFAULT_RATING: f64 = 4.0;

/// Error converting a Mapbox payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Directions returned a non-"Ok" code
    #[error("directions failed with code {code}: {message}")]
    DirectionsFailed { code: String, message: String },

    /// Directions "Ok" but no routes
    #[error("directions returned no routes")]
    NoRoutes,

    /// Feature geometry isn't a `[lng, lat]` pair in range
    #[error("feature {id} has invalid coordinates")]
    InvalidGeometry { id: String },
}

/// Take the first route from a directions response.
pub fn convert_directions(resp: DirectionsResponse) -> Result<RoutingResult, ConversionError> {
    if resp.code != "Ok" {
        return Err(ConversionError::DirectionsFailed {
            message: resp.message.unwrap_or_default(),
            code: resp.code,
        });
    }

    let route = resp.routes.into_iter().next().ok_or(ConversionError::NoRoutes)?;

    let steps = route
        .legs
        .into_iter()
        .next()
        .map(|leg| {
            leg.steps
                .into_iter()
                .map(|s| RouteStep {
                    instruction: s.maneuver.instruction.unwrap_or_default(),
                    distance_meters: s.distance,
                    duration_seconds: s.duration,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(RoutingResult {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        steps,
    })
}

/// Build a place from a retrieved feature.
///
/// `queried` is the category that was searched for, recorded on the place
/// alongside any categories recognised in the feature's own tags.
pub fn convert_feature(
    feature: Feature,
    queried: Option<PlaceCategory>,
) -> Result<Place, ConversionError> {
    let props = feature.properties;
    let invalid = || ConversionError::InvalidGeometry {
        id: props.mapbox_id.clone(),
    };

    let (lng, lat) = match feature.geometry.coordinates.as_slice() {
        [lng, lat, ..] => (*lng, *lat),
        _ => return Err(invalid()),
    };
    let coordinate = Coordinate::new(lat, lng).map_err(|_| invalid())?;

    let name = props
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "Unnamed Location".to_string());

    let (rating, review_count) = props
        .metadata
        .map(|meta| (meta.rating, meta.review_count))
        .unwrap_or_default();

    let mut place = Place::new(props.mapbox_id, name, coordinate)
        .with_rating(rating.unwrap_or(DEFAULT_RATING));
    if let Some(count) = review_count {
        place = place.with_review_count(count);
    }

    if let Some(category) = queried {
        place = place.with_category(category);
    }
    for tag in &props.poi_category {
        if let Some(category) = category_from_tag(tag) {
            place = place.with_category(category);
        }
    }
    if place.categories.is_empty() {
        place = place.with_category(PlaceCategory::PointOfInterest);
    }

    if let Some(address) = props.full_address.or(props.place_formatted) {
        place = place.with_description(address);
    }

    Ok(place)
}

/// Recognise a Mapbox POI category tag.
pub fn category_from_tag(tag: &str) -> Option<PlaceCategory> {
    let tag = tag.to_lowercase();
    let category = match tag.as_str() {
        "museum" => PlaceCategory::Museum,
        "art gallery" | "art_gallery" | "gallery" => PlaceCategory::ArtGallery,
        "park" | "garden" => PlaceCategory::Park,
        "monument" | "landmark" => PlaceCategory::Landmark,
        "historic site" | "historic_site" | "historical landmark" => {
            PlaceCategory::HistoricalLandmark
        }
        "tourist attraction" | "attraction" => PlaceCategory::TouristAttraction,
        "restaurant" => PlaceCategory::Restaurant,
        "cafe" | "coffee" | "coffee shop" => PlaceCategory::Cafe,
        "shopping mall" | "shopping_mall" | "mall" => PlaceCategory::ShoppingMall,
        "department store" => PlaceCategory::DepartmentStore,
        "library" => PlaceCategory::Library,
        "church" => PlaceCategory::Church,
        "mosque" => PlaceCategory::Mosque,
        "hindu temple" | "temple" => PlaceCategory::HinduTemple,
        "zoo" => PlaceCategory::Zoo,
        "amusement park" | "theme park" => PlaceCategory::AmusementPark,
        "natural feature" | "beach" | "lake" | "mountain" => PlaceCategory::NaturalFeature,
        _ => return None,
    };
    Some(category)
}

/// Text query phrasing for a category search in `city`.
pub fn search_phrase(category: Option<PlaceCategory>, city: &str) -> String {
    let what = match category {
        None | Some(PlaceCategory::PointOfInterest) => "attractions",
        Some(PlaceCategory::Museum) => "museums",
        Some(PlaceCategory::Park) => "parks",
        Some(PlaceCategory::Restaurant) => "restaurants",
        Some(PlaceCategory::ShoppingMall) => "shopping",
        Some(PlaceCategory::AmusementPark) => "entertainment",
        Some(PlaceCategory::TouristAttraction) => "tourist attractions",
        Some(other) => return format!("{} in {city}", other.as_str().replace('_', " ")),
    };
    format!("{what} in {city}")
}

/// `west,south,east,north` bounding box for a radius around `center`.
pub fn bounding_box(center: Coordinate, radius_meters: f64) -> String {
    let (lat_delta, lng_delta) = geo::bounding_deltas(center, radius_meters);
    let south = (center.latitude() - lat_delta).max(-90.0);
    let north = (center.latitude() + lat_delta).min(90.0);
    let west = (center.longitude() - lng_delta).max(-180.0);
    let east = (center.longitude() + lng_delta).min(180.0);
    format!("{west},{south},{east},{north}")
}

//! Points of interest.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Provider-assigned place identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of place searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    TouristAttraction,
    Museum,
    ArtGallery,
    Landmark,
    Park,
    HistoricalLandmark,
    PointOfInterest,
    NaturalFeature,
    Restaurant,
    Cafe,
    ShoppingMall,
    DepartmentStore,
    Library,
    Church,
    Mosque,
    HinduTemple,
    Zoo,
    AmusementPark,
}

impl PlaceCategory {
    /// Provider tag, e.g. `tourist_attraction`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::TouristAttraction => "tourist_attraction",
            PlaceCategory::Museum => "museum",
            PlaceCategory::ArtGallery => "art_gallery",
            PlaceCategory::Landmark => "landmark",
            PlaceCategory::Park => "park",
            PlaceCategory::HistoricalLandmark => "historical_landmark",
            PlaceCategory::PointOfInterest => "point_of_interest",
            PlaceCategory::NaturalFeature => "natural_feature",
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::ShoppingMall => "shopping_mall",
            PlaceCategory::DepartmentStore => "department_store",
            PlaceCategory::Library => "library",
            PlaceCategory::Church => "church",
            PlaceCategory::Mosque => "mosque",
            PlaceCategory::HinduTemple => "hindu_temple",
            PlaceCategory::Zoo => "zoo",
            PlaceCategory::AmusementPark => "amusement_park",
        }
    }

    /// Categories implied by a free-form traveller preference.
    ///
    /// Unknown preferences imply nothing.
    pub fn for_preference(preference: &str) -> &'static [PlaceCategory] {
        use PlaceCategory::*;

        match preference.trim().to_ascii_lowercase().as_str() {
            "food" => &[Restaurant, Cafe],
            "culture" | "cultural" => &[ArtGallery, Museum],
            "nature" => &[Park, NaturalFeature],
            "shopping" => &[ShoppingMall, DepartmentStore],
            "museums" => &[Museum],
            "parks" => &[Park],
            "historical" => &[HistoricalLandmark],
            "entertainment" => &[AmusementPark, Zoo],
            _ => &[],
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a place came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceSource {
    /// Returned by the external place-search capability.
    Search,
    /// Synthesised around the start point when search found nothing.
    Synthetic,
}

/// A point of interest.
///
/// Identity is `id`. Places are immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub coordinate: Coordinate,
    /// Average rating in `[0, 5]`, if the provider has one.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub categories: BTreeSet<PlaceCategory>,
    /// Street address or short description, if known.
    pub description: Option<String>,
    pub source: PlaceSource,
}

impl Place {
    /// Create a search result with no rating, reviews or categories.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: PlaceId::new(id),
            name: name.into(),
            coordinate,
            rating: None,
            review_count: None,
            categories: BTreeSet::new(),
            description: None,
            source: PlaceSource::Search,
        }
    }

    /// Set the rating, clamped into `[0, 5]`. Non-finite ratings are dropped.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.is_finite().then(|| rating.clamp(0.0, 5.0));
        self
    }

    pub fn with_review_count(mut self, count: u32) -> Self {
        self.review_count = Some(count);
        self
    }

    pub fn with_category(mut self, category: PlaceCategory) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn synthetic(mut self) -> Self {
        self.source = PlaceSource::Synthetic;
        self
    }

    /// Rating used for ordering: unrated places sort as 0.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Secondary identity for duplicate detection across providers that
    /// assign different ids to the same place.
    pub fn name_location_key(&self) -> (String, super::CoordinateKey) {
        (
            self.name.trim().to_lowercase(),
            self.coordinate.rounded_key(4),
        )
    }
}

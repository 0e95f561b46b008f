//! Candidate place discovery.
//!
//! Searches a tiered list of categories around the start, keeps places that
//! clear each tier's quality bar, and ranks what survives by rating.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::{Coordinate, CoordinateKey, Place, PlaceCategory, PlaceId, TransportMode};
use crate::places::{PlaceQuery, PlaceSearch, PlaceSearchProvider};

use super::config::{PlannerConfig, TierRule};

/// Categories always searched first.
const DEFAULT_PRIMARY: &[PlaceCategory] = &[
    PlaceCategory::TouristAttraction,
    PlaceCategory::Museum,
    PlaceCategory::ArtGallery,
    PlaceCategory::Landmark,
    PlaceCategory::Park,
    PlaceCategory::HistoricalLandmark,
    PlaceCategory::PointOfInterest,
];

/// Categories searched with a relaxed bar when the primary tier comes up short.
const SECONDARY: &[PlaceCategory] = &[
    PlaceCategory::Restaurant,
    PlaceCategory::Cafe,
    PlaceCategory::ShoppingMall,
    PlaceCategory::Library,
    PlaceCategory::Church,
    PlaceCategory::Mosque,
    PlaceCategory::HinduTemple,
    PlaceCategory::Zoo,
    PlaceCategory::AmusementPark,
];

/// Primary categories for a set of preferences, in search order, without repeats.
pub fn primary_categories(preferences: &[String]) -> Vec<PlaceCategory> {
    let mut categories = DEFAULT_PRIMARY.to_vec();
    for preference in preferences {
        for &category in PlaceCategory::for_preference(preference) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    categories
}

/// Places kept so far, distinct by id, in the order they were found.
#[derive(Default)]
struct Collected {
    places: Vec<Place>,
    ids: HashSet<PlaceId>,
}

impl Collected {
    fn extend(&mut self, places: Vec<Place>, rule: Option<TierRule>) -> usize {
        let before = self.places.len();
        for place in places {
            if rule.is_some_and(|r| !r.keeps(&place)) {
                continue;
            }
            if self.ids.insert(place.id.clone()) {
                self.places.push(place);
            }
        }
        self.places.len() - before
    }

    fn len(&self) -> usize {
        self.places.len()
    }
}

/// Finds and ranks candidate places for an outing.
pub struct CandidateLocationFinder<'a, S: PlaceSearch> {
    places: &'a PlaceSearchProvider<S>,
    config: &'a PlannerConfig,
}

impl<'a, S: PlaceSearch> CandidateLocationFinder<'a, S> {
    pub fn new(places: &'a PlaceSearchProvider<S>, config: &'a PlannerConfig) -> Self {
        Self { places, config }
    }

    /// Candidate places around `start`, best rated first.
    ///
    /// Returns at most `max_candidates` places, distinct by id and by
    /// (name, rounded location). An empty result is not an error.
    pub async fn find(
        &self,
        start: Coordinate,
        city: &str,
        duration_hours: f64,
        mode: TransportMode,
        preferences: &[String],
    ) -> Vec<Place> {
        let radius = self.config.search_radius(duration_hours, mode);
        let primary = primary_categories(preferences);
        let mut collected = Collected::default();

        debug!(radius, categories = primary.len(), "searching primary categories");
        let found = self.search_all(start, city, radius, &primary).await;
        for places in found {
            collected.extend(places, Some(self.config.primary_tier));
        }

        if collected.len() < self.config.primary_target {
            let secondary: Vec<PlaceCategory> = SECONDARY
                .iter()
                .copied()
                .filter(|c| !primary.contains(c))
                .collect();
            info!(
                found = collected.len(),
                "few primary candidates, widening to secondary categories"
            );

            for batch in secondary.chunks(self.config.batch_size.max(1)) {
                let found = self.search_all(start, city, radius, batch).await;
                for places in found {
                    collected.extend(places, Some(self.config.secondary_tier));
                }
                if collected.len() >= self.config.secondary_target {
                    break;
                }
            }
        }

        if collected.places.is_empty() {
            info!(city, "no categorised candidates, trying a generic search");
            let query = PlaceQuery::new(start, None, radius, city);
            collected.extend(self.places.search(&query).await, None);
        }

        let ranked = rank(collected.places, self.config.max_candidates);
        debug!(candidates = ranked.len(), "candidate search complete");
        ranked
    }

    /// One search per category, run concurrently, results in category order.
    async fn search_all(
        &self,
        center: Coordinate,
        city: &str,
        radius: f64,
        categories: &[PlaceCategory],
    ) -> Vec<Vec<Place>> {
        let queries: Vec<PlaceQuery> = categories
            .iter()
            .map(|&c| PlaceQuery::new(center, Some(c), radius, city))
            .collect();
        let searches: Vec<_> = queries.iter().map(|q| self.places.search(q)).collect();
        join_all(searches).await
    }
}

/// Drop near-duplicates, sort by rating descending (stable), cap.
fn rank(places: Vec<Place>, cap: usize) -> Vec<Place> {
    let mut seen: HashSet<(String, CoordinateKey)> = HashSet::new();
    let mut unique: Vec<Place> = places
        .into_iter()
        .filter(|p| seen.insert(p.name_location_key()))
        .collect();
    unique.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
    unique.truncate(cap);
    unique
}

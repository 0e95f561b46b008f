//! Cached, quality-filtered place search.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::domain::{CoordinateKey, Place, PlaceCategory};

use super::{PlaceQuery, PlaceSearch, PlaceSearchError};

/// Cache key: rounded center, category, radius in whole meters, lowercased city.
pub type PlaceSearchKey = (CoordinateKey, Option<PlaceCategory>, u32, String);

/// Shared cache of filtered search results.
pub type PlaceSearchCache = TtlCache<PlaceSearchKey, Arc<Vec<Place>>>;

/// Name fragments that mark a result as not worth visiting.
const DEFAULT_DENYLIST: &[&str] = &[
    "police",
    "station",
    "factory",
    "industrial",
    "office",
    "warehouse",
    "hospital",
];

/// Configuration for place search.
#[derive(Debug, Clone)]
pub struct PlaceSearchConfig {
    /// Lowercase name fragments that reject a result.
    pub denylist: Vec<String>,

    /// Results rated below this are rejected. Unrated results pass.
    pub min_rating: f64,

    /// Maximum time to wait for one search call.
    pub call_timeout: Duration,

    /// Decimal places kept when rounding the center into cache keys.
    pub coordinate_precision: u32,
}

impl PlaceSearchConfig {
    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Set the cache key precision.
    pub fn with_coordinate_precision(mut self, precision: u32) -> Self {
        self.coordinate_precision = precision;
        self
    }

    /// Whether a result passes the quality filter.
    pub fn accepts(&self, place: &Place) -> bool {
        let name = place.name.to_lowercase();
        if self.denylist.iter().any(|word| name.contains(word.as_str())) {
            return false;
        }
        place.rating.is_none_or(|r| r >= self.min_rating)
    }
}

impl Default for PlaceSearchConfig {
    fn default() -> Self {
        Self {
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            min_rating: 3.5,
            call_timeout: Duration::from_secs(10),
            coordinate_precision: 5,
        }
    }
}

/// Place search that never fails.
pub struct PlaceSearchProvider<S: PlaceSearch> {
    search: S,
    cache: PlaceSearchCache,
    config: PlaceSearchConfig,
}

impl<S: PlaceSearch> PlaceSearchProvider<S> {
    /// Create a provider over `search`, sharing `cache` with other providers.
    pub fn new(search: S, cache: PlaceSearchCache, config: PlaceSearchConfig) -> Self {
        Self {
            search,
            cache,
            config,
        }
    }

    /// Access the underlying search service.
    pub fn service(&self) -> &S {
        &self.search
    }

    /// Search and filter, returning an empty list if the service fails.
    pub async fn search(&self, query: &PlaceQuery) -> Vec<Place> {
        match self.try_search(query).await {
            Ok(places) => places.as_ref().clone(),
            Err(e) => {
                warn!(
                    category = ?query.category,
                    center = %query.center,
                    error = %e,
                    "place search failed, treating as no results"
                );
                Vec::new()
            }
        }
    }

    /// Search and filter, surfacing service failures.
    ///
    /// Only successful answers are cached.
    pub async fn try_search(&self, query: &PlaceQuery) -> Result<Arc<Vec<Place>>, PlaceSearchError> {
        let key = self.key(query);

        if let Some(cached) = self.cache.get(&key).await {
            debug!(category = ?query.category, "place search cache hit");
            return Ok(cached);
        }

        let raw = tokio::time::timeout(self.config.call_timeout, self.search.query(query))
            .await
            .map_err(|_| PlaceSearchError::Timeout)??;

        let total = raw.len();
        let kept: Vec<Place> = raw
            .into_iter()
            .filter(|p| self.config.accepts(p))
            .collect();
        debug!(
            category = ?query.category,
            total,
            kept = kept.len(),
            "place search filtered"
        );

        let kept = Arc::new(kept);
        self.cache.insert(key, kept.clone()).await;
        Ok(kept)
    }

    fn key(&self, query: &PlaceQuery) -> PlaceSearchKey {
        (
            query.center.rounded_key(self.config.coordinate_precision),
            query.category,
            query.radius_meters.max(0.0).round() as u32,
            query.city.trim().to_lowercase(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::domain::Coordinate;
    use std::sync::Mutex;

    fn center() -> Coordinate {
        Coordinate::new(38.7223, -9.1393).unwrap()
    }

    fn place(id: &str, name: &str, rating: Option<f64>) -> Place {
        let p = Place::new(id, name, center());
        match rating {
            Some(r) => p.with_rating(r),
            None => p,
        }
    }

    struct StubSearch {
        answer: Result<Vec<Place>, PlaceSearchError>,
        calls: Mutex<usize>,
    }

    impl StubSearch {
        fn new(answer: Result<Vec<Place>, PlaceSearchError>) -> Self {
            Self {
                answer,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl PlaceSearch for StubSearch {
        async fn query(&self, _query: &PlaceQuery) -> Result<Vec<Place>, PlaceSearchError> {
            *self.calls.lock().unwrap() += 1;
            self.answer.clone()
        }
    }

    fn provider(answer: Result<Vec<Place>, PlaceSearchError>) -> PlaceSearchProvider<StubSearch> {
        PlaceSearchProvider::new(
            StubSearch::new(answer),
            TtlCache::new(&CacheConfig::default()),
            PlaceSearchConfig::default(),
        )
    }

    fn query() -> PlaceQuery {
        PlaceQuery::new(center(), Some(PlaceCategory::Museum), 5000.0, "Lisbon")
    }

    #[test]
    fn filter_rejects_denylisted_names() {
        let config = PlaceSearchConfig::default();
        assert!(!config.accepts(&place("1", "Central Police Station", None)));
        assert!(!config.accepts(&place("2", "Old WAREHOUSE Lofts", Some(4.9))));
        assert!(config.accepts(&place("3", "Belém Tower", Some(4.6))));
    }

    #[test]
    fn filter_rejects_low_ratings_only_when_rated() {
        let config = PlaceSearchConfig::default();
        assert!(!config.accepts(&place("1", "Sad Park", Some(3.4))));
        assert!(config.accepts(&place("2", "Okay Park", Some(3.5))));
        assert!(config.accepts(&place("3", "Unrated Park", None)));
    }

    #[tokio::test]
    async fn search_filters_results() {
        let p = provider(Ok(vec![
            place("1", "Gulbenkian Museum", Some(4.8)),
            place("2", "Fire Station", Some(4.0)),
            place("3", "Meh Museum", Some(2.0)),
        ]));

        let found = p.search(&query()).await;
        let ids: Vec<_> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[tokio::test]
    async fn failure_returns_empty() {
        let p = provider(Err(PlaceSearchError::RateLimited));
        assert!(p.search(&query()).await.is_empty());
        assert!(p.try_search(&query()).await.is_err());
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let p = provider(Err(PlaceSearchError::Network("down".into())));
        p.search(&query()).await;
        p.search(&query()).await;
        assert_eq!(p.service().calls(), 2);
    }

    #[tokio::test]
    async fn successes_are_cached() {
        let p = provider(Ok(vec![place("1", "Gulbenkian Museum", Some(4.8))]));
        p.search(&query()).await;
        let again = p.search(&query()).await;
        assert_eq!(again.len(), 1);
        assert_eq!(p.service().calls(), 1);
    }

    #[tokio::test]
    async fn different_categories_are_separate_entries() {
        let p = provider(Ok(vec![]));
        p.search(&query()).await;
        let mut other = query();
        other.category = Some(PlaceCategory::Park);
        p.search(&other).await;
        assert_eq!(p.service().calls(), 2);
    }

    #[tokio::test]
    async fn precision_controls_center_sharing() {
        let nearby = |lat: f64| {
            PlaceQuery::new(
                Coordinate::new(lat, -9.1393).unwrap(),
                Some(PlaceCategory::Museum),
                5000.0,
                "Lisbon",
            )
        };

        let coarse = PlaceSearchProvider::new(
            StubSearch::new(Ok(vec![])),
            TtlCache::new(&CacheConfig::default()),
            PlaceSearchConfig::default().with_coordinate_precision(2),
        );
        coarse.search(&nearby(38.7221)).await;
        coarse.search(&nearby(38.7224)).await;
        assert_eq!(coarse.service().calls(), 1);

        let fine = provider(Ok(vec![]));
        fine.search(&nearby(38.7221)).await;
        fine.search(&nearby(38.7224)).await;
        assert_eq!(fine.service().calls(), 2);
    }
}

//! Synthetic stops for when no real places are found.
//!
//! Stops are spread on a planar spiral around the start: equally spaced
//! bearings, radius growing with index. Planar offsets are only sound for
//! the small radii used here.

use crate::domain::{Coordinate, Place, PlaceCategory, TransportMode};
use crate::geo;

use super::builder::target_stops;
use super::config::PlannerConfig;

/// Generic stop name and description; `{city}` is replaced.
struct Template {
    name: &'static str,
    description: &'static str,
    category: PlaceCategory,
}

const TEMPLATES: &[Template] = &[
    Template {
        name: "{city} Old Town Square",
        description: "A central square in {city}, good for people-watching.",
        category: PlaceCategory::Landmark,
    },
    Template {
        name: "{city} Riverside Walk",
        description: "A stretch of open space to slow down and look around {city}.",
        category: PlaceCategory::Park,
    },
    Template {
        name: "{city} Local History Corner",
        description: "Streets where {city}'s older buildings are still standing.",
        category: PlaceCategory::HistoricalLandmark,
    },
    Template {
        name: "{city} Neighbourhood Café",
        description: "A spot for a coffee and a break from exploring {city}.",
        category: PlaceCategory::Cafe,
    },
    Template {
        name: "{city} Viewpoint",
        description: "A raised spot with a view over {city}.",
        category: PlaceCategory::TouristAttraction,
    },
    Template {
        name: "{city} Market Street",
        description: "A busy street of small shops and stalls in {city}.",
        category: PlaceCategory::PointOfInterest,
    },
];

/// Generates synthetic places around a start point.
pub struct FallbackLocationGenerator<'a> {
    config: &'a PlannerConfig,
}

impl<'a> FallbackLocationGenerator<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// One synthetic place per target stop, each on a distinct bearing.
    pub fn generate(
        &self,
        start: Coordinate,
        city: &str,
        duration_hours: f64,
        mode: TransportMode,
    ) -> Vec<Place> {
        let count = target_stops(duration_hours);
        let scale = self.config.fallback_scale_degrees.get(mode);
        let city = city.trim();

        (0..count)
            .map(|i| {
                let bearing = i as f64 * 360.0 / count as f64;
                let radius = scale * (i + 1) as f64;
                let template = &TEMPLATES[i % TEMPLATES.len()];
                Place::new(
                    format!("synthetic-{i}"),
                    template.name.replace("{city}", city),
                    geo::planar_offset(start, bearing, radius),
                )
                .with_description(template.description.replace("{city}", city))
                .with_category(template.category)
                .synthetic()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlaceSource;
    use std::collections::HashSet;

    fn start() -> Coordinate {
        Coordinate::new(48.8566, 2.3522).unwrap()
    }

    fn generate(hours: f64, mode: TransportMode) -> Vec<Place> {
        let config = PlannerConfig::default();
        FallbackLocationGenerator::new(&config).generate(start(), "Paris", hours, mode)
    }

    #[test]
    fn count_follows_target() {
        assert_eq!(generate(0.5, TransportMode::Walking).len(), 2);
        assert_eq!(generate(2.0, TransportMode::Walking).len(), 3);
        assert_eq!(generate(4.0, TransportMode::Walking).len(), 4);
        assert_eq!(generate(8.0, TransportMode::Walking).len(), 5);
    }

    #[test]
    fn places_are_synthetic_and_named_for_city() {
        let places = generate(2.0, TransportMode::Transit);
        for p in &places {
            assert_eq!(p.source, PlaceSource::Synthetic);
            assert!(p.name.starts_with("Paris "));
            assert!(p.description.as_deref().is_some_and(|d| d.contains("Paris")));
            assert!(!p.name.contains("{city}"));
        }
        let ids: HashSet<_> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), places.len());
    }

    #[test]
    fn distinct_bearings_at_growing_radius() {
        let places = generate(4.0, TransportMode::Walking);

        // 4 stops: 0°, 90°, 180°, 270° at 0.003, 0.006, 0.009, 0.012 degrees.
        let first = places[0].coordinate;
        assert!((first.latitude() - (48.8566 + 0.003)).abs() < 1e-9);
        assert!((first.longitude() - 2.3522).abs() < 1e-9);

        let second = places[1].coordinate;
        assert!((second.latitude() - 48.8566).abs() < 1e-9);
        assert!((second.longitude() - (2.3522 + 0.006)).abs() < 1e-9);

        let third = places[2].coordinate;
        assert!((third.latitude() - (48.8566 - 0.009)).abs() < 1e-9);

        // Offsets are planar degrees; radius grows by one scale step per stop.
        for (i, p) in places.iter().enumerate() {
            let radius = (p.coordinate.latitude() - start().latitude())
                .hypot(p.coordinate.longitude() - start().longitude());
            assert!((radius - 0.003 * (i + 1) as f64).abs() < 1e-9, "stop {i}: {radius}");
        }
    }

    #[test]
    fn faster_modes_spread_further() {
        let walk = generate(2.0, TransportMode::Walking);
        let drive = generate(2.0, TransportMode::Driving);
        let d = |p: &Place| geo::distance_meters(start(), p.coordinate);
        assert!(d(&walk[0]) < d(&drive[0]));
    }
}

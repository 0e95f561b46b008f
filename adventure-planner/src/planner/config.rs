//! Configuration for outing planning.

use crate::domain::{Place, TransportMode};

/// One number per transport mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerMode {
    pub walking: f64,
    pub transit: f64,
    pub driving: f64,
}

impl PerMode {
    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Walking => self.walking,
            TransportMode::Transit => self.transit,
            TransportMode::Driving => self.driving,
        }
    }
}

/// Keep rule for one search tier.
///
/// A place is kept when it is rated at least `min_rating` or has more than
/// `min_reviews` reviews. Unrated places count as rated zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRule {
    pub min_rating: f64,
    pub min_reviews: u32,
}

impl TierRule {
    pub fn keeps(&self, place: &Place) -> bool {
        place.rating_or_zero() >= self.min_rating
            || place.review_count.unwrap_or(0) > self.min_reviews
    }
}

/// Configuration parameters for outing planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Dwell floor per stop, start included (minutes).
    pub min_minutes_per_stop: u32,

    /// Maximum number of candidate places kept after ranking.
    pub max_candidates: usize,

    /// Search radius grows with duration at this rate (meters per hour).
    pub search_meters_per_hour: PerMode,

    /// Search radius clamp (meters).
    pub min_radius_meters: f64,
    pub max_radius_meters: f64,

    /// Keep rule for the default and preference categories.
    pub primary_tier: TierRule,

    /// Keep rule for the relaxed secondary categories.
    pub secondary_tier: TierRule,

    /// The secondary tier runs only when the primary tier found fewer than this.
    pub primary_target: usize,

    /// The secondary tier stops once this many places have accumulated.
    pub secondary_target: usize,

    /// Secondary categories searched concurrently per batch.
    pub batch_size: usize,

    /// Spacing of synthetic stops per unit index (degrees).
    pub fallback_scale_degrees: PerMode,
}

impl PlannerConfig {
    /// Search radius for an outing of `duration_hours` by `mode`, clamped.
    pub fn search_radius(&self, duration_hours: f64, mode: TransportMode) -> f64 {
        let raw = duration_hours.max(0.0) * self.search_meters_per_hour.get(mode);
        raw.clamp(self.min_radius_meters, self.max_radius_meters)
    }

    /// Set the dwell floor.
    pub fn with_min_minutes_per_stop(mut self, minutes: u32) -> Self {
        self.min_minutes_per_stop = minutes;
        self
    }

    /// Set the candidate cap.
    pub fn with_max_candidates(mut self, n: usize) -> Self {
        self.max_candidates = n;
        self
    }

    /// Set the secondary-tier batch size.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n.max(1);
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_minutes_per_stop: 10,
            max_candidates: 15,
            search_meters_per_hour: PerMode {
                walking: 2_000.0,
                transit: 5_000.0,
                driving: 8_000.0,
            },
            min_radius_meters: 2_000.0,
            max_radius_meters: 15_000.0,
            primary_tier: TierRule {
                min_rating: 4.0,
                min_reviews: 50,
            },
            secondary_tier: TierRule {
                min_rating: 3.5,
                min_reviews: 20,
            },
            primary_target: 5,
            secondary_target: 10,
            batch_size: 3,
            fallback_scale_degrees: PerMode {
                walking: 0.003,
                transit: 0.007,
                driving: 0.01,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn place(rating: Option<f64>, reviews: Option<u32>) -> Place {
        let mut p = Place::new("p", "Somewhere", Coordinate::new(0.0, 0.0).unwrap());
        if let Some(r) = rating {
            p = p.with_rating(r);
        }
        if let Some(n) = reviews {
            p = p.with_review_count(n);
        }
        p
    }

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.min_minutes_per_stop, 10);
        assert_eq!(config.max_candidates, 15);
        assert_eq!(config.min_radius_meters, 2_000.0);
        assert_eq!(config.max_radius_meters, 15_000.0);
        assert_eq!(config.primary_target, 5);
        assert_eq!(config.secondary_target, 10);
    }

    #[test]
    fn radius_scales_and_clamps() {
        let config = PlannerConfig::default();

        assert_eq!(config.search_radius(0.5, TransportMode::Walking), 2_000.0);
        assert_eq!(config.search_radius(3.0, TransportMode::Walking), 6_000.0);
        assert_eq!(config.search_radius(2.0, TransportMode::Transit), 10_000.0);
        assert_eq!(config.search_radius(4.0, TransportMode::Driving), 15_000.0);
    }

    #[test]
    fn radius_grows_with_mode_speed() {
        let config = PlannerConfig::default();
        let walk = config.search_radius(1.5, TransportMode::Walking);
        let transit = config.search_radius(1.5, TransportMode::Transit);
        let drive = config.search_radius(1.5, TransportMode::Driving);
        assert!(walk < transit && transit < drive);
    }

    #[test]
    fn tier_rules() {
        let config = PlannerConfig::default();
        let primary = config.primary_tier;
        let secondary = config.secondary_tier;

        assert!(primary.keeps(&place(Some(4.2), None)));
        assert!(primary.keeps(&place(Some(3.0), Some(51))));
        assert!(!primary.keeps(&place(Some(3.9), Some(50))));
        assert!(!primary.keeps(&place(None, None)));

        assert!(secondary.keeps(&place(Some(3.5), None)));
        assert!(secondary.keeps(&place(None, Some(21))));
        assert!(!secondary.keeps(&place(Some(3.4), Some(20))));
    }

    #[test]
    fn builders() {
        let config = PlannerConfig::default()
            .with_min_minutes_per_stop(15)
            .with_max_candidates(8)
            .with_batch_size(0);
        assert_eq!(config.min_minutes_per_stop, 15);
        assert_eq!(config.max_candidates, 8);
        assert_eq!(config.batch_size, 1);
    }
}

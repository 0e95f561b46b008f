//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Coordinate, DomainError, Itinerary, Leg, PlaceSource, RouteStep, Stop, TransportMode,
};

/// Request to plan an itinerary.
#[derive(Debug, Deserialize)]
pub struct PlanItineraryRequest {
    /// Where the outing starts
    pub start: LocationDto,

    /// City name, used to phrase searches and name synthetic stops
    pub city: String,

    /// Time available, in hours
    pub duration_hours: f64,

    /// "walking", "public transit", "car/taxi" (or "transit", "driving")
    pub transport_mode: String,

    /// Free-form interests such as "food" or "museums"
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl PlanItineraryRequest {
    /// Parse the start point and transport mode.
    ///
    /// Duration and city are checked by the planner itself.
    pub fn parse(&self) -> Result<(Coordinate, TransportMode), DomainError> {
        let start = Coordinate::new(self.start.latitude, self.start.longitude)?;
        let mode = TransportMode::parse(&self.transport_mode)?;
        Ok((start, mode))
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for LocationDto {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude(),
            longitude: c.longitude(),
        }
    }
}

/// Response to a plan request.
#[derive(Debug, Serialize)]
pub struct PlanItineraryResponse {
    pub itinerary: ItineraryResult,
    pub metadata: PlanMetadata,
}

/// Request bookkeeping returned alongside the itinerary.
#[derive(Debug, Serialize)]
pub struct PlanMetadata {
    /// RFC 3339 timestamp
    pub generated_at: String,

    pub generation_time_ms: u64,

    /// Radius candidates were searched within
    pub search_radius_meters: f64,
}

/// A planned itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub stops: Vec<StopResult>,
    pub legs: Vec<LegResult>,
    pub transport_mode: String,
    pub budget_minutes: u32,
    pub total_travel_minutes: u32,
    /// Budget left after travel; negative when travel alone overruns
    pub remaining_minutes: i64,
    pub is_feasible: bool,
    /// Stops were synthesised because no real places were found
    pub uses_synthetic_locations: bool,
    /// At least one leg's time is an estimate rather than a routed figure
    pub has_estimated_legs: bool,
}

impl ItineraryResult {
    pub fn from_itinerary(it: &Itinerary) -> Self {
        Self {
            stops: it.stops.iter().map(StopResult::from_stop).collect(),
            legs: it.legs.iter().map(LegResult::from_leg).collect(),
            transport_mode: it.transport_mode.display_name().to_string(),
            budget_minutes: it.budget_minutes,
            total_travel_minutes: it.total_travel_minutes,
            remaining_minutes: it.remaining_minutes,
            is_feasible: it.is_feasible,
            uses_synthetic_locations: it.uses_synthetic_locations,
            has_estimated_legs: it.has_estimated_legs(),
        }
    }
}

/// A stop on the itinerary.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub name: String,
    pub location: LocationDto,
    /// True for the starting point, which is not a place
    pub is_start: bool,
    pub place_id: Option<String>,
    pub rating: Option<f64>,
    pub categories: Vec<String>,
    pub description: Option<String>,
    pub is_synthetic: bool,
    pub time_to_spend_minutes: u32,
    pub travel_time_to_next_minutes: u32,
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        let place = stop.place();
        Self {
            name: stop.name.clone(),
            location: stop.coordinate.into(),
            is_start: stop.is_start(),
            place_id: place.map(|p| p.id.to_string()),
            rating: place.and_then(|p| p.rating),
            categories: place
                .map(|p| p.categories.iter().map(|c| c.as_str().to_string()).collect())
                .unwrap_or_default(),
            description: place.and_then(|p| p.description.clone()),
            is_synthetic: place.is_some_and(|p| p.source == PlaceSource::Synthetic),
            time_to_spend_minutes: stop.time_to_spend_minutes,
            travel_time_to_next_minutes: stop.travel_time_to_next_minutes,
        }
    }
}

/// Travel between two consecutive stops.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub travel_minutes: u32,
    pub distance_meters: f64,
    pub is_estimated: bool,
    pub steps: Vec<RouteStep>,
}

impl LegResult {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            from: leg.origin_name.clone(),
            to: leg.dest_name.clone(),
            travel_minutes: leg.travel_minutes,
            distance_meters: leg.distance_meters,
            is_estimated: leg.is_estimated,
            steps: leg.steps.clone(),
        }
    }
}

/// Service status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub supported_transport_modes: Vec<&'static str>,
    pub supported_preferences: Vec<&'static str>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Place, PlaceCategory};

    fn coord() -> Coordinate {
        Coordinate::new(52.52, 13.405).unwrap()
    }

    #[test]
    fn request_defaults_preferences() {
        let req: PlanItineraryRequest = serde_json::from_str(
            r#"{
                "start": { "latitude": 52.52, "longitude": 13.405 },
                "city": "Berlin",
                "duration_hours": 2.5,
                "transport_mode": "public transit"
            }"#,
        )
        .unwrap();
        assert!(req.preferences.is_empty());

        let (start, mode) = req.parse().unwrap();
        assert_eq!(start, coord());
        assert_eq!(mode, TransportMode::Transit);
    }

    #[test]
    fn request_rejects_bad_fields() {
        let mut req = PlanItineraryRequest {
            start: LocationDto {
                latitude: 95.0,
                longitude: 0.0,
            },
            city: "Berlin".into(),
            duration_hours: 2.0,
            transport_mode: "walking".into(),
            preferences: vec![],
        };
        assert!(matches!(
            req.parse(),
            Err(DomainError::InvalidCoordinate(_))
        ));

        req.start.latitude = 52.0;
        req.transport_mode = "jetpack".into();
        assert!(matches!(
            req.parse(),
            Err(DomainError::InvalidTransportMode(_))
        ));
    }

    #[test]
    fn itinerary_result_from_itinerary() {
        let place = Place::new("p1", "Museumsinsel", coord())
            .with_rating(4.7)
            .with_category(PlaceCategory::Museum);
        let mut start = Stop::start(coord());
        start.time_to_spend_minutes = 10;
        start.travel_time_to_next_minutes = 6;
        let mut visit = Stop::at_place(place);
        visit.time_to_spend_minutes = 94;

        let it = Itinerary {
            stops: vec![start, visit],
            legs: vec![Leg {
                origin_name: "Starting Point".into(),
                dest_name: "Museumsinsel".into(),
                travel_minutes: 6,
                distance_meters: 480.0,
                is_estimated: true,
                steps: vec![],
            }],
            total_travel_minutes: 6,
            remaining_minutes: 114,
            is_feasible: true,
            transport_mode: TransportMode::Driving,
            budget_minutes: 120,
            uses_synthetic_locations: false,
        };

        let result = ItineraryResult::from_itinerary(&it);
        assert_eq!(result.transport_mode, "car/taxi");
        assert!(result.has_estimated_legs);
        assert!(result.stops[0].is_start);
        assert_eq!(result.stops[0].place_id, None);
        assert_eq!(result.stops[1].place_id.as_deref(), Some("p1"));
        assert_eq!(result.stops[1].categories, vec!["museum"]);
        assert_eq!(result.stops[1].rating, Some(4.7));
        assert!(!result.stops[1].is_synthetic);
        assert_eq!(result.legs[0].to, "Museumsinsel");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["stops"][1]["location"]["latitude"], 52.52);
        assert_eq!(json["remaining_minutes"], 114);
    }
}

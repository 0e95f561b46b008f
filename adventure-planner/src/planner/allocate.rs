//! Dwell-time allocation across the stops of a settled route.

use crate::domain::{Leg, Stop};

/// Weight of the first stop (the start).
const FIRST_WEIGHT: f64 = 0.5;

/// Weight of the last stop.
const LAST_WEIGHT: f64 = 1.0;

/// Weight of every stop in between.
const INTERIOR_WEIGHT: f64 = 1.2;

fn weight(index: usize, count: usize) -> f64 {
    if index == 0 {
        FIRST_WEIGHT
    } else if index + 1 == count {
        LAST_WEIGHT
    } else {
        INTERIOR_WEIGHT
    }
}

/// Assign `time_to_spend_minutes` and `travel_time_to_next_minutes` to
/// every stop.
///
/// Every stop gets at least `min_minutes_per_stop`. When the time left
/// after travel can't cover that floor for all stops, each gets exactly the
/// floor. Otherwise the surplus is shared by weight, interior stops
/// getting the most. Never fails.
pub fn allocate_time(
    mut stops: Vec<Stop>,
    legs: &[Leg],
    budget_minutes: u32,
    min_minutes_per_stop: u32,
) -> Vec<Stop> {
    let count = stops.len();
    if count == 0 {
        return stops;
    }

    let travel: i64 = legs.iter().map(|l| i64::from(l.travel_minutes)).sum();
    let remaining = i64::from(budget_minutes) - travel;
    let floor_total = count as i64 * i64::from(min_minutes_per_stop);

    if remaining < floor_total {
        for stop in &mut stops {
            stop.time_to_spend_minutes = min_minutes_per_stop;
        }
    } else {
        let surplus = (remaining - floor_total) as f64;
        let total_weight: f64 = (0..count).map(|i| weight(i, count)).sum();
        for (i, stop) in stops.iter_mut().enumerate() {
            let extra = weight(i, count) * surplus / total_weight;
            stop.time_to_spend_minutes = min_minutes_per_stop + extra.round() as u32;
        }
    }

    for (i, stop) in stops.iter_mut().enumerate() {
        stop.travel_time_to_next_minutes = legs.get(i).map_or(0, |l| l.travel_minutes);
    }

    stops
}

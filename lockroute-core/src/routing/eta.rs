//! Trip duration estimate: time underway plus time spent in locks.

use serde::{Deserialize, Serialize};

/// Inputs for [`calculate_eta`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaInput {
    pub distance_km: f64,
    pub boat_speed_kmh: f64,
    pub lock_count: usize,
    pub lock_transit_min: f64,
}

/// Time breakdown for a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaResult {
    pub distance_km: f64,
    pub lock_count: usize,
    /// Time underway, excluding locks
    pub water_time_min: f64,
    /// Total lock waiting and transit time
    pub lock_time_min: f64,
    pub total_time_min: f64,
    /// Human readable total, e.g. `4 h 35 min`
    pub total_formatted: String,
}

/// Estimates trip duration
///
/// A non-positive speed yields zero time underway instead of dividing by
/// zero.
#[allow(clippy::cast_precision_loss)]
pub fn calculate_eta(input: &EtaInput) -> EtaResult {
    let water_time_min = if input.boat_speed_kmh > 0.0 {
        input.distance_km / input.boat_speed_kmh * 60.0
    } else {
        0.0
    };
    let lock_time_min = input.lock_count as f64 * input.lock_transit_min;
    let total_time_min = water_time_min + lock_time_min;

    EtaResult {
        distance_km: input.distance_km,
        lock_count: input.lock_count,
        water_time_min,
        lock_time_min,
        total_time_min,
        total_formatted: format_duration(total_time_min),
    }
}

/// Formats minutes as `"45 min"` or `"2 h 5 min"` after rounding to the
/// nearest minute. Input must be non-negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(total_min: f64) -> String {
    let rounded = total_min.round() as u64;
    if rounded < 60 {
        return format!("{rounded} min");
    }
    format!("{} h {} min", rounded / 60, rounded % 60)
}

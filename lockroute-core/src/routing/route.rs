//! Route builder
//!
//! Connects waypoints with straight great-circle legs. There is no snapping
//! to the waterway network: the route visits waypoints in the given order.

use geo::{Distance, Haversine, LineString};
use itertools::Itertools;

use crate::model::Waypoint;

/// Route through an ordered list of waypoints
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Path visiting each waypoint in order, as (longitude, latitude)
    pub geometry: LineString<f64>,
    /// Total length in kilometres, rounded to one decimal place
    pub distance_km: f64,
}

impl Route {
    /// Number of vertices, one per waypoint
    pub fn len(&self) -> usize {
        self.geometry.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }
}

/// Builds a route through `waypoints`
///
/// Returns `None` for fewer than two waypoints; that is the normal state of
/// a planner before the user has placed a second stop.
pub fn build_route(waypoints: &[Waypoint]) -> Option<Route> {
    if waypoints.len() < 2 {
        return None;
    }

    let geometry: LineString<f64> = waypoints.iter().map(|w| w.coordinates).collect();
    let distance_km = round_to_tenth(path_length_km(&geometry));

    Some(Route {
        geometry,
        distance_km,
    })
}

/// Sum of haversine distances between consecutive vertices, in km
pub(crate) fn path_length_km(line: &LineString<f64>) -> f64 {
    let meters: f64 = line
        .points()
        .tuple_windows()
        .map(|(from, to)| Haversine.distance(from, to))
        .sum();
    meters / 1000.0
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

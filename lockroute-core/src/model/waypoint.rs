use geo::Point;
use serde::{Deserialize, Serialize};

/// Waypoint identifier, unique within a planner session
pub type WaypointId = u64;

/// User-placed stop defining the route path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    /// Position as (longitude, latitude)
    #[serde(with = "super::lnglat")]
    pub coordinates: Point<f64>,
    /// Place name, usually filled in later by reverse geocoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Waypoint {
    pub fn new(id: WaypointId, coordinates: Point<f64>) -> Self {
        Self {
            id,
            coordinates,
            label: None,
        }
    }
}

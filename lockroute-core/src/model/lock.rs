//! Navigation locks and river signs

use geo::Point;
use serde::{Deserialize, Serialize};

/// Waterway lock (écluse)
///
/// Locks are immutable once loaded. The planner replaces its whole
/// candidate set when new data arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lock {
    pub id: String,
    pub name: String,
    /// Position as (longitude, latitude)
    #[serde(with = "super::lnglat")]
    pub coordinates: Point<f64>,
    /// Reference code, e.g. `SN-01`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Opening hours in OSM syntax, e.g. `Mo-Su 09:00-19:00`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

impl Lock {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Point<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            lock_ref: None,
            operator: None,
            opening_hours: None,
        }
    }
}

/// CEVNI sign family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignCategory {
    /// A-series: no entry, no overtaking, speed limits
    Prohibition,
    /// B-series: keep to a side, sound horn
    Obligation,
    /// C/D-series: hazards, low bridges, shallow water
    Warning,
    /// E-series: mooring, water points, fuel
    Information,
}

/// River navigation sign, displayed but never part of route derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverSign {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "super::lnglat")]
    pub coordinates: Point<f64>,
    pub category: SignCategory,
    /// CEVNI code, e.g. `A.1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_metadata_is_omitted() {
        let lock = Lock::new("l1", "Test Lock", Point::new(2.4, 48.85));
        let json = serde_json::to_value(&lock).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "l1",
                "name": "Test Lock",
                "coordinates": [2.4, 48.85],
            })
        );
    }

    #[test]
    fn sign_category_is_lowercase() {
        let json = serde_json::to_string(&SignCategory::Information).unwrap();
        assert_eq!(json, r#""information""#);
    }
}

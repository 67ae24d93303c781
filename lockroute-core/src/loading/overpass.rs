//! OpenStreetMap Overpass API adapter
//!
//! Locks are mapped in OSM either as `waterway=lock_gate` nodes or as
//! `waterway=lock` ways. Ways come back with a computed `center`, so both
//! shapes normalize to a single point per lock.

use std::time::Duration;

use geo::Point;
use hashbrown::HashMap;
use log::{debug, info};
use serde::Deserialize;

use super::{BoundingBox, LockSource};
use crate::{Error, model::Lock};

pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

const UNNAMED_LOCK: &str = "Unnamed lock";

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Present on ways and relations queried with `out center`
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl OverpassElement {
    fn coordinates(&self) -> Option<Point<f64>> {
        if self.kind == ElementKind::Node
            && let (Some(lat), Some(lon)) = (self.lat, self.lon)
        {
            return Some(Point::new(lon, lat));
        }
        self.center
            .as_ref()
            .map(|center| Point::new(center.lon, center.lat))
    }

    fn tag(&self, key: &str) -> Option<String> {
        self.tags.get(key).cloned()
    }
}

/// Overpass QL query for lock gates and lock ways inside `bbox`
pub fn build_bbox_query(bbox: &BoundingBox) -> String {
    format!(
        "[out:json][timeout:{timeout}];
(
  node[\"waterway\"=\"lock_gate\"]({bbox});
  way[\"waterway\"=\"lock\"]({bbox});
);
out center tags;",
        timeout = FETCH_TIMEOUT.as_secs(),
    )
}

/// Converts Overpass elements to locks, skipping elements without a position
pub fn parse_overpass_locks(response: &OverpassResponse) -> Vec<Lock> {
    response
        .elements
        .iter()
        .filter_map(|element| {
            let Some(coordinates) = element.coordinates() else {
                debug!("Skipping OSM element {} without coordinates", element.id);
                return None;
            };
            Some(Lock {
                id: format!("osm-{}", element.id),
                name: element
                    .tag("name")
                    .unwrap_or_else(|| UNNAMED_LOCK.to_string()),
                coordinates,
                lock_ref: element.tag("ref"),
                operator: element.tag("operator"),
                opening_hours: element.tag("opening_hours"),
            })
        })
        .collect()
}

/// HTTP client for an Overpass API endpoint
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    url: String,
}

impl OverpassClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl LockSource for OverpassClient {
    async fn fetch_locks(&self, bbox: &BoundingBox) -> Result<Vec<Lock>, Error> {
        let query = build_bbox_query(bbox);
        info!("Querying Overpass for locks in {bbox}");

        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::NetworkError(format!(
                "Overpass returned HTTP {status}"
            )));
        }

        let body: OverpassResponse = response.json().await?;
        let locks = parse_overpass_locks(&body);
        info!(
            "Overpass returned {} elements, {} usable locks",
            body.elements.len(),
            locks.len()
        );
        Ok(locks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<Lock> {
        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        parse_overpass_locks(&response)
    }

    #[test]
    fn node_becomes_lock() {
        let locks = parse(
            r#"{"elements": [{
                "type": "node", "id": 12345, "lat": 48.8566, "lon": 2.3522,
                "tags": {"name": "Écluse de Test", "ref": "SN-01", "operator": "VNF"}
            }]}"#,
        );
        assert_eq!(locks.len(), 1);
        let lock = &locks[0];
        assert_eq!(lock.id, "osm-12345");
        assert_eq!(lock.name, "Écluse de Test");
        assert_eq!(lock.coordinates.x_y(), (2.3522, 48.8566));
        assert_eq!(lock.lock_ref.as_deref(), Some("SN-01"));
        assert_eq!(lock.operator.as_deref(), Some("VNF"));
        assert!(lock.opening_hours.is_none());
    }

    #[test]
    fn missing_name_falls_back() {
        let locks = parse(
            r#"{"elements": [{"type": "node", "id": 99, "lat": 45.0, "lon": 5.0, "tags": {}}]}"#,
        );
        assert_eq!(locks[0].name, UNNAMED_LOCK);

        let locks = parse(r#"{"elements": [{"type": "node", "id": 98, "lat": 45.0, "lon": 5.0}]}"#);
        assert_eq!(locks[0].name, UNNAMED_LOCK);
    }

    #[test]
    fn way_uses_center() {
        let locks = parse(
            r#"{"elements": [{
                "type": "way", "id": 55555, "center": {"lat": 47.5, "lon": 3.5},
                "tags": {"name": "Canal Lock", "opening_hours": "Mo-Su 09:00-19:00"}
            }]}"#,
        );
        assert_eq!(locks[0].coordinates.x_y(), (3.5, 47.5));
        assert_eq!(locks[0].opening_hours.as_deref(), Some("Mo-Su 09:00-19:00"));
    }

    #[test]
    fn skips_elements_without_position() {
        let locks =
            parse(r#"{"elements": [{"type": "way", "id": 1, "tags": {"name": "Bad Lock"}}]}"#);
        assert!(locks.is_empty());
    }

    #[test]
    fn empty_response() {
        assert!(parse(r#"{"elements": []}"#).is_empty());
        assert!(parse("{}").is_empty());
    }

    #[test]
    fn unknown_element_types_are_tolerated() {
        let locks = parse(
            r#"{"elements": [{"type": "area", "id": 7, "center": {"lat": 1.0, "lon": 2.0}}]}"#,
        );
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn query_uses_overpass_bbox_order() {
        let bbox = BoundingBox::new(48.8, 1.1, 49.5, 2.4).unwrap();
        let query = build_bbox_query(&bbox);
        assert!(query.starts_with("[out:json][timeout:15];"));
        assert!(query.contains(r#"node["waterway"="lock_gate"](48.8,1.1,49.5,2.4);"#));
        assert!(query.contains(r#"way["waterway"="lock"](48.8,1.1,49.5,2.4);"#));
        assert!(query.ends_with("out center tags;"));
    }
}

use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{Corridor, Route};
use crate::{
    Error,
    model::{Lock, Waypoint},
};

impl Route {
    /// Converts the route to a `GeoJSON` `LineString` feature carrying its
    /// rounded length as `distanceKm`.
    pub fn to_feature(&self) -> Result<Feature, Error> {
        let geometry = Geometry::new(GeoJsonValue::from(&self.geometry));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "kind": "route",
                "distanceKm": self.distance_km,
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

impl Corridor {
    pub fn to_feature(&self) -> Result<Feature, Error> {
        let geometry = Geometry::new(GeoJsonValue::from(&self.to_geographic()));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "kind": "corridor",
                "radiusKm": self.radius_km(),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

pub(crate) fn lock_feature(lock: &Lock, on_route: bool) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&lock.coordinates));

    let value = json!({
        "type": "Feature",
        "id": lock.id,
        "geometry": geometry,
        "properties": {
            "kind": "lock",
            "name": lock.name,
            "ref": lock.lock_ref,
            "operator": lock.operator,
            "openingHours": lock.opening_hours,
            "onRoute": on_route,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

pub(crate) fn waypoint_feature(waypoint: &Waypoint, index: usize) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&waypoint.coordinates));

    let value = json!({
        "type": "Feature",
        "id": waypoint.id,
        "geometry": geometry,
        "properties": {
            "kind": "waypoint",
            "index": index,
            "label": waypoint.label,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::routing::build_route;

    #[test]
    fn route_feature_carries_distance() {
        let route = build_route(&[
            Waypoint::new(1, Point::new(2.35, 48.85)),
            Waypoint::new(2, Point::new(2.40, 48.90)),
        ])
        .unwrap();

        let feature = route.to_feature().unwrap();
        let properties = feature.properties.unwrap();
        assert_eq!(properties["kind"], "route");
        assert_eq!(properties["distanceKm"], route.distance_km);

        let value = serde_json::to_value(feature.geometry.unwrap()).unwrap();
        assert_eq!(value["type"], "LineString");
        assert_eq!(value["coordinates"][0][0], 2.35);
        assert_eq!(value["coordinates"][1][1], 48.9);
    }

    #[test]
    fn lock_feature_marks_route_membership() {
        let lock = Lock::new("l1", "Écluse de Test", Point::new(2.4, 48.85));
        let feature = lock_feature(&lock, true).unwrap();
        let properties = feature.properties.unwrap();
        assert_eq!(properties["onRoute"], true);
        assert_eq!(properties["name"], "Écluse de Test");
    }
}

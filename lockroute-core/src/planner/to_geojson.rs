use geojson::FeatureCollection;
use hashbrown::HashSet;

use super::RoutePlanner;
use crate::{
    Error, LOCK_BUFFER_KM,
    routing::{
        Corridor,
        to_geojson::{lock_feature, waypoint_feature},
    },
};

impl RoutePlanner {
    /// Everything a map surface draws, as one `GeoJSON` `FeatureCollection`:
    /// corridor and route when present, waypoints in order, and every lock
    /// candidate tagged with whether it lies on the route.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::new();

        if let Some(route) = self.route() {
            if let Ok(corridor) = Corridor::new(&route.geometry, LOCK_BUFFER_KM) {
                features.push(corridor.to_feature()?);
            }
            features.push(route.to_feature()?);
        }

        for (index, waypoint) in self.waypoints().iter().enumerate() {
            features.push(waypoint_feature(waypoint, index)?);
        }

        let on_route: HashSet<&str> = self
            .locks_on_route()
            .iter()
            .map(|lock| lock.id.as_str())
            .collect();
        for lock in self.all_locks() {
            features.push(lock_feature(lock, on_route.contains(lock.id.as_str()))?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use crate::{Lock, RoutePlanner};

    fn kinds(planner: &RoutePlanner) -> Vec<String> {
        planner
            .to_geojson()
            .unwrap()
            .features
            .into_iter()
            .map(|f| f.properties.unwrap()["kind"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn empty_planner_has_only_locks() {
        let mut planner = RoutePlanner::default();
        planner.replace_locks(vec![Lock::new("l1", "L", Point::new(2.4, 48.85))]);
        assert_eq!(kinds(&planner), vec!["lock"]);
    }

    #[test]
    fn full_collection_order() {
        let mut planner = RoutePlanner::default();
        planner.replace_locks(vec![
            Lock::new("on", "On", Point::new(2.40, 48.85)),
            Lock::new("off", "Off", Point::new(5.0, 43.0)),
        ]);
        planner.add_waypoint(Point::new(2.35, 48.85));
        planner.add_waypoint(Point::new(2.45, 48.85));

        assert_eq!(
            kinds(&planner),
            vec!["corridor", "route", "waypoint", "waypoint", "lock", "lock"]
        );

        let collection = planner.to_geojson().unwrap();
        let flags: Vec<bool> = collection.features[4..]
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["onRoute"].as_bool().unwrap())
            .collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn corridor_and_lock_properties() {
        let mut planner = RoutePlanner::default();
        planner.replace_locks(vec![Lock::new("on", "On", Point::new(2.40, 48.85))]);
        planner.add_waypoint(Point::new(2.35, 48.85));
        planner.add_waypoint(Point::new(2.45, 48.85));

        let collection = planner.to_geojson().unwrap();
        let corridor = serde_json::to_value(&collection.features[0]).unwrap();
        assert_eq!(corridor["geometry"]["type"], "MultiPolygon");
        assert_eq!(corridor["properties"]["radiusKm"], 0.1);

        let waypoint = serde_json::to_value(&collection.features[3]).unwrap();
        assert_eq!(waypoint["properties"]["index"], 1);

        let lock = serde_json::to_value(&collection.features[4]).unwrap();
        assert_eq!(lock["properties"]["onRoute"], true);
        assert!(lock["properties"].get("on_route").is_none());
    }

    #[test]
    fn serializes_to_feature_collection() {
        let planner = RoutePlanner::default();
        let json: serde_json::Value =
            serde_json::from_str(&planner.to_geojson_string().unwrap()).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
    }
}

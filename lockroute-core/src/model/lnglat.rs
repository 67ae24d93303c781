//! Serde adapter storing a `geo::Point` as a `[longitude, latitude]` pair,
//! the order used by `GeoJSON` and map surfaces.

use geo::Point;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S>(point: &Point<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    [point.x(), point.y()].serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Point<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let [lon, lat] = <[f64; 2]>::deserialize(deserializer)?;
    if !(lon.is_finite() && lat.is_finite()) {
        return Err(serde::de::Error::custom("coordinates must be finite"));
    }
    Ok(Point::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        at: Point<f64>,
    }

    #[test]
    fn writes_longitude_first() {
        let json = serde_json::to_string(&Wrapper {
            at: Point::new(2.35, 48.85),
        })
        .unwrap();
        assert_eq!(json, r#"{"at":[2.35,48.85]}"#);
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":[2.35]}"#).is_err());
    }
}

use std::fmt;
use std::str::FromStr;

use geo::{BoundingRect, LineString};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for non-finite values, latitudes
    /// outside ±90°, longitudes outside ±180°, or inverted edges.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, Error> {
        let bbox = Self {
            south,
            west,
            north,
            east,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let values = [self.south, self.west, self.north, self.east];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidData(format!("non-finite bounding box {self}")));
        }
        if self.south < -90.0 || self.north > 90.0 || self.west < -180.0 || self.east > 180.0 {
            return Err(Error::InvalidData(format!(
                "bounding box {self} is outside the valid coordinate range"
            )));
        }
        if self.south > self.north || self.west > self.east {
            return Err(Error::InvalidData(format!("inverted bounding box {self}")));
        }
        Ok(())
    }

    /// Envelope of `line` grown by `margin_deg` on every side, clamped to
    /// valid coordinates
    pub fn around(line: &LineString<f64>, margin_deg: f64) -> Option<Self> {
        let rect = line.bounding_rect()?;
        Some(Self {
            south: (rect.min().y - margin_deg).max(-90.0),
            west: (rect.min().x - margin_deg).max(-180.0),
            north: (rect.max().y + margin_deg).min(90.0),
            east: (rect.max().x + margin_deg).min(180.0),
        })
    }
}

/// `south,west,north,east`, the order used by Overpass QL
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidData(format!("invalid bounding box '{s}': {e}")))?;

        match values.as_slice() {
            &[south, west, north, east] => Self::new(south, west, north, east),
            _ => Err(Error::InvalidData(format!(
                "bounding box '{s}' must have four values: south,west,north,east"
            ))),
        }
    }
}

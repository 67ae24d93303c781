//! Corridor lock matching
//!
//! A lock is on route when its great-circle distance to the nearest route
//! leg is at most the corridor radius. Legs are the same great-circle arcs
//! the route length is summed over, so the radius is a true ground distance
//! anywhere along the route.

use std::f64::consts::{FRAC_PI_2, PI};

use geo::{
    Bearing, BooleanOps, Coord, Distance, Haversine, LineString, MapCoords, MultiPolygon, Point,
    Polygon,
};
use itertools::Itertools;
use log::{debug, trace};

use super::Route;
use crate::{Error, LOCK_BUFFER_KM, model::Lock};

/// Mean earth radius in metres, the one `Haversine` uses
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Polygon edges used for each half-circle cap of the drawn outline
const CAP_SEGMENTS: usize = 16;

/// Equirectangular projection around a reference point, in metres
#[derive(Debug, Clone, Copy)]
struct LocalFrame {
    origin: Coord<f64>,
    cos_lat: f64,
}

impl LocalFrame {
    fn centred_on(origin: Coord<f64>) -> Self {
        Self {
            origin,
            cos_lat: origin.y.to_radians().cos(),
        }
    }

    fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (coord.x - self.origin.x).to_radians() * EARTH_RADIUS_M * self.cos_lat,
            y: (coord.y - self.origin.y).to_radians() * EARTH_RADIUS_M,
        }
    }

    fn unproject(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.origin.x + (coord.x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees(),
            y: self.origin.y + (coord.y / EARTH_RADIUS_M).to_degrees(),
        }
    }
}

/// Route leg with non-zero length
#[derive(Debug, Clone, Copy)]
struct Leg {
    start: Point<f64>,
    end: Point<f64>,
    /// Initial bearing from `start` towards `end`, in radians
    forward: f64,
    /// Initial bearing from `end` back towards `start`, in radians
    backward: f64,
}

impl Leg {
    fn new(start: Point<f64>, end: Point<f64>) -> Option<Self> {
        if Haversine.distance(start, end) <= f64::EPSILON {
            return None;
        }
        Some(Self {
            start,
            end,
            forward: Haversine.bearing(start, end).to_radians(),
            backward: Haversine.bearing(end, start).to_radians(),
        })
    }

    /// Great-circle distance in metres from `point` to the closest point of
    /// the leg
    fn distance_m(&self, point: Point<f64>) -> f64 {
        let from_start = Haversine.distance(self.start, point);
        let to_point = Haversine.bearing(self.start, point).to_radians();
        if (to_point - self.forward).cos() <= 0.0 {
            return from_start;
        }
        let from_end = Haversine.bearing(self.end, point).to_radians();
        if (from_end - self.backward).cos() <= 0.0 {
            return Haversine.distance(self.end, point);
        }

        // Cross-track distance to the great circle through the leg
        let angular = from_start / EARTH_RADIUS_M;
        (angular.sin() * (to_point - self.forward).sin()).asin().abs() * EARTH_RADIUS_M
    }

    /// Capsule around the leg drawn in a frame centred on its midpoint
    fn outline(&self, radius_m: f64) -> Option<Polygon<f64>> {
        let frame = LocalFrame::centred_on(Coord {
            x: (self.start.x() + self.end.x()) / 2.0,
            y: (self.start.y() + self.end.y()) / 2.0,
        });
        let capsule = segment_capsule(
            frame.project(self.start.0),
            frame.project(self.end.0),
            radius_m,
        )?;
        Some(capsule.map_coords(|c| frame.unproject(c)))
    }
}

/// Buffered area around a route
#[derive(Debug, Clone)]
pub struct Corridor {
    legs: Vec<Leg>,
    radius_km: f64,
}

impl Corridor {
    /// Buffers `line` by `radius_km` on all sides
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateGeometry`] when the line has no extent
    /// (fewer than two vertices, non-finite coordinates, or every vertex at
    /// the same place) and [`Error::InvalidData`] for a non-positive radius.
    pub fn new(line: &LineString<f64>, radius_km: f64) -> Result<Self, Error> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(Error::InvalidData(format!(
                "corridor radius must be positive, got {radius_km} km"
            )));
        }
        if line.0.len() < 2 {
            return Err(Error::DegenerateGeometry("route has fewer than two vertices"));
        }
        if !line.coords().all(|c| c.x.is_finite() && c.y.is_finite()) {
            return Err(Error::DegenerateGeometry("route has non-finite coordinates"));
        }

        let legs: Vec<Leg> = line
            .points()
            .tuple_windows()
            .filter_map(|(start, end)| Leg::new(start, end))
            .collect();

        if legs.is_empty() {
            return Err(Error::DegenerateGeometry("route has zero length"));
        }
        trace!("Built corridor of {} legs", legs.len());

        Ok(Self { legs, radius_km })
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// True when `point` is at most the corridor radius from the route
    pub fn contains(&self, point: &Point<f64>) -> bool {
        let radius_m = self.radius_km * 1000.0;
        self.legs.iter().any(|leg| leg.distance_m(*point) <= radius_m)
    }

    /// Corridor outline as (longitude, latitude), for drawing
    ///
    /// Each leg is outlined in its own local frame. Matching goes through
    /// [`Corridor::contains`], never through this polygon.
    pub fn to_geographic(&self) -> MultiPolygon<f64> {
        let radius_m = self.radius_km * 1000.0;
        self.legs
            .iter()
            .filter_map(|leg| leg.outline(radius_m))
            .fold(MultiPolygon::new(Vec::new()), |acc, capsule| acc.union(&capsule))
    }
}

/// Stadium shape around one segment: two parallel sides joined by
/// half-circle caps. Cap polygons are circumscribed, so the whole disk of
/// the given radius around each endpoint is covered.
fn segment_capsule(from: Coord<f64>, to: Coord<f64>, radius: f64) -> Option<Polygon<f64>> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = dx.hypot(dy);
    if length <= f64::EPSILON {
        return None;
    }

    // Left-hand normal of the segment direction
    let normal_angle = dy.atan2(dx) + FRAC_PI_2;
    let step = PI / CAP_SEGMENTS as f64;
    let corner_radius = radius / (step / 2.0).cos();

    let at = |center: Coord<f64>, angle: f64, r: f64| Coord {
        x: center.x + r * angle.cos(),
        y: center.y + r * angle.sin(),
    };

    let mut ring = Vec::with_capacity(2 * CAP_SEGMENTS + 4);
    // Clockwise: left side of `to`, around its cap, back along the right side
    for (center, start) in [(to, normal_angle), (from, normal_angle - PI)] {
        ring.push(at(center, start, radius));
        ring.extend(
            (0..CAP_SEGMENTS).map(|k| at(center, start - (k as f64 + 0.5) * step, corner_radius)),
        );
        ring.push(at(center, start - PI, radius));
    }

    Some(Polygon::new(LineString::new(ring), Vec::new()))
}

/// Locks within [`LOCK_BUFFER_KM`] of the route, in candidate order
pub fn locks_on_route(route: &Route, locks: &[Lock]) -> Vec<Lock> {
    locks_within(&route.geometry, locks, LOCK_BUFFER_KM)
}

pub fn count_locks_on_route(route: &Route, locks: &[Lock]) -> usize {
    locks_on_route(route, locks).len()
}

/// Locks within `radius_km` of `line`, in candidate order
///
/// Returns an empty list when the corridor cannot be built.
pub fn locks_within(line: &LineString<f64>, locks: &[Lock], radius_km: f64) -> Vec<Lock> {
    if locks.is_empty() {
        return Vec::new();
    }

    let corridor = match Corridor::new(line, radius_km) {
        Ok(corridor) => corridor,
        Err(e) => {
            debug!("No corridor for route, matching no locks: {e}");
            return Vec::new();
        }
    };

    locks
        .iter()
        .filter(|lock| corridor.contains(&lock.coordinates))
        .cloned()
        .collect()
}

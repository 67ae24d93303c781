//! Route planner state
//!
//! [`RoutePlanner`] owns the waypoints, the lock candidate set, the sign set
//! and the settings. Every mutation recomputes the route, the corridor locks
//! and the ETA together and stores them as one [`Derived`] value, so readers
//! never see a route paired with locks or an ETA from different inputs.

mod to_geojson;

use geo::Point;
use log::debug;

use crate::model::{Lock, RiverSign, Settings, SettingsPatch, Waypoint, WaypointId};
use crate::routing::{EtaInput, EtaResult, Route, build_route, calculate_eta, locks_on_route};

/// Guidance shown while there is no route yet
pub const ADD_WAYPOINTS_GUIDANCE: &str = "Click the map to add waypoints";

/// Values derived from the planner inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derived {
    pub route: Option<Route>,
    /// Locks inside the route corridor, in candidate order
    pub locks_on_route: Vec<Lock>,
    pub eta: Option<EtaResult>,
}

impl Derived {
    /// Runs the full pipeline: route, then corridor locks, then ETA
    pub fn compute(waypoints: &[Waypoint], locks: &[Lock], settings: &Settings) -> Self {
        let Some(route) = build_route(waypoints) else {
            return Self::default();
        };

        let locks_on_route = locks_on_route(&route, locks);
        let eta = calculate_eta(&EtaInput {
            distance_km: route.distance_km,
            boat_speed_kmh: settings.boat_speed_kmh,
            lock_count: locks_on_route.len(),
            lock_transit_min: settings.lock_transit_min,
        });

        Self {
            route: Some(route),
            locks_on_route,
            eta: Some(eta),
        }
    }
}

/// Single source of truth for a planning session
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    waypoints: Vec<Waypoint>,
    all_locks: Vec<Lock>,
    signs: Vec<RiverSign>,
    settings: Settings,
    derived: Derived,
    next_id: WaypointId,
}

impl RoutePlanner {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Appends a waypoint at `coordinates` and returns its id
    pub fn add_waypoint(&mut self, coordinates: Point<f64>) -> WaypointId {
        self.push_waypoint(coordinates, None)
    }

    pub fn add_labeled_waypoint(
        &mut self,
        coordinates: Point<f64>,
        label: impl Into<String>,
    ) -> WaypointId {
        self.push_waypoint(coordinates, Some(label.into()))
    }

    fn push_waypoint(&mut self, coordinates: Point<f64>, label: Option<String>) -> WaypointId {
        self.next_id += 1;
        let id = self.next_id;
        self.waypoints.push(Waypoint {
            id,
            coordinates,
            label,
        });
        self.recompute();
        id
    }

    /// Removes the waypoint with `id`; returns false when there was none
    pub fn remove_waypoint(&mut self, id: WaypointId) -> bool {
        let before = self.waypoints.len();
        self.waypoints.retain(|w| w.id != id);
        let removed = self.waypoints.len() != before;
        self.recompute();
        removed
    }

    /// Moves the waypoint with `id`; returns false when there was none
    pub fn update_waypoint_position(&mut self, id: WaypointId, coordinates: Point<f64>) -> bool {
        let found = match self.waypoints.iter_mut().find(|w| w.id == id) {
            Some(waypoint) => {
                waypoint.coordinates = coordinates;
                true
            }
            None => false,
        };
        self.recompute();
        found
    }

    pub fn clear_waypoints(&mut self) {
        self.waypoints.clear();
        self.derived = Derived::default();
    }

    /// Replaces the whole lock candidate set
    pub fn replace_locks(&mut self, locks: Vec<Lock>) {
        self.all_locks = locks;
        self.recompute();
    }

    /// Signs are displayed only and never affect the route
    pub fn set_signs(&mut self, signs: Vec<RiverSign>) {
        self.signs = signs;
    }

    /// Merges `patch` into the current settings
    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.settings = self.settings.merged(patch);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.derived = Derived::compute(&self.waypoints, &self.all_locks, &self.settings);
        debug!(
            "Recomputed route: {} waypoints, {:?} km, {} of {} locks on route",
            self.waypoints.len(),
            self.derived.route.as_ref().map(|r| r.distance_km),
            self.derived.locks_on_route.len(),
            self.all_locks.len()
        );
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn all_locks(&self) -> &[Lock] {
        &self.all_locks
    }

    pub fn signs(&self) -> &[RiverSign] {
        &self.signs
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn route(&self) -> Option<&Route> {
        self.derived.route.as_ref()
    }

    pub fn locks_on_route(&self) -> &[Lock] {
        &self.derived.locks_on_route
    }

    pub fn eta(&self) -> Option<&EtaResult> {
        self.derived.eta.as_ref()
    }

    /// Hint for the user while fewer than two waypoints exist
    pub fn guidance(&self) -> Option<&'static str> {
        (self.waypoints.len() < 2).then_some(ADD_WAYPOINTS_GUIDANCE)
    }
}

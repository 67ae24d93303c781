//! River route planning with navigation locks
//!
//! Waypoints are joined into a straight-line route, locks are matched
//! against a fixed corridor around it, and the trip duration is estimated
//! from cruising speed and per-lock transit time. [`RoutePlanner`] owns the
//! inputs and keeps the derived route, corridor locks and ETA consistent.

pub mod error;
pub mod loading;
pub mod model;
pub mod planner;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{
    BoundingBox, LockLoader, LockSource, OverpassClient, builtin_locks, builtin_signs,
};
pub use model::{Lock, RiverSign, Settings, SettingsPatch, SignCategory, Waypoint, WaypointId};
pub use planner::{Derived, RoutePlanner};
pub use routing::{
    Corridor, EtaInput, EtaResult, Route, build_route, calculate_eta, format_duration,
    locks_on_route,
};

/// Corridor half-width in kilometres within which a lock counts as on route
pub const LOCK_BUFFER_KM: f64 = 0.1;

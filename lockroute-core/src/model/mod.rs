//! Data model for river route planning
//!
//! Contains waypoints, locks, navigation signs and planner settings.

pub mod lnglat;
pub mod lock;
pub mod settings;
pub mod waypoint;

pub use lock::{Lock, RiverSign, SignCategory};
pub use settings::{Settings, SettingsPatch};
pub use waypoint::{Waypoint, WaypointId};

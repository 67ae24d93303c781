pub use crate::LOCK_BUFFER_KM;

// Re-export key components
pub use crate::loading::{BoundingBox, LockLoader, LockSource, OverpassClient};
pub use crate::loading::{builtin_locks, builtin_signs};
pub use crate::model::{Lock, RiverSign, Settings, SettingsPatch, Waypoint};
pub use crate::planner::{Derived, RoutePlanner};
pub use crate::routing::{EtaResult, Route, calculate_eta, format_duration, locks_on_route};

// Identifiers
pub use crate::WaypointId;

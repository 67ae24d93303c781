//! Route derivation: straight-line route building, corridor lock matching
//! and travel time estimation.

pub mod corridor;
pub mod eta;
pub mod route;
pub(crate) mod to_geojson;

pub use corridor::{Corridor, count_locks_on_route, locks_on_route, locks_within};
pub use eta::{EtaInput, EtaResult, calculate_eta, format_duration};
pub use route::{Route, build_route};

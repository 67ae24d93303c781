//! This module is responsible for loading lock candidates and reference data:
//! the Overpass API adapter, the built-in sample set used as fallback, and
//! the one-shot loader that ties them together.

mod bbox;
mod builtin;
mod loader;
pub mod overpass;

pub use bbox::BoundingBox;
pub use builtin::{builtin_locks, builtin_signs};
pub use loader::{LockLoader, LockSource, resolve_locks};
pub use overpass::OverpassClient;

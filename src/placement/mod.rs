//! Deterministic component placement: assigns a position, rotation, and
//! layer side to every component in a netlist, grouped by kind and
//! constrained to the board outline, spacing, and thermal density rules.
pub mod engine;
pub mod error;
pub mod groups;
pub mod zones;

pub use engine::PlacementEngine;
pub use error::{PlacementError, PlacementFailureReason};
pub use groups::{group_of, Group};
pub use zones::{grid_candidates, ZoneKind, Zones};

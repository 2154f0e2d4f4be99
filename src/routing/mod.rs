//! The grid-based autorouter: per-class rules, a multi-layer grid model, an
//! A* path search, and net ordering with rip-up/retry.
pub mod error;
pub mod grid;
pub mod pathfind;
pub mod router;
pub mod rules;

pub use error::RoutingError;
pub use router::{RouteResult, Router};
pub use rules::{rule_for, RoutingRule};

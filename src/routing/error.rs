use thiserror::Error;

use crate::model::ids::NetId;

/// Routing failures are non-fatal: the driver keeps going and the
/// validation engine reports the net as a connectivity violation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RoutingError {
    #[error("net {net_id} could not be routed within the search and rip-up budget (doc ref: routing.infeasible)")]
    RoutingInfeasible { net_id: NetId },
}

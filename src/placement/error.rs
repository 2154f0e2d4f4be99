use thiserror::Error;

use crate::model::ids::ComponentId;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlacementFailureReason {
    NoZoneCandidate,
    BoardTooSmall,
    DensityExceeded,
}

impl std::fmt::Display for PlacementFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlacementFailureReason::NoZoneCandidate => "no candidate position satisfied spacing and containment",
            PlacementFailureReason::BoardTooSmall => "board is too small for the component's zone",
            PlacementFailureReason::DensityExceeded => "thermal density limit exceeded near every candidate",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("component {component_id} could not be placed: {reason} (doc ref: placement.infeasible)")]
    Infeasible { component_id: ComponentId, reason: PlacementFailureReason },
}

use thiserror::Error;

use crate::model::ids::NetId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSynthError {
    #[error("plane-carrying net {net_id} has no free region left on its layer after clearance (doc ref: zonesynth.no_region)")]
    NoFreeRegion { net_id: NetId },
}

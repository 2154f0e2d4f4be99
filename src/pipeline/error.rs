use thiserror::Error;

use crate::placement::PlacementError;
use crate::validation::ValidationError;
use crate::zonesynth::error::ZoneSynthError;

/// Errors the pipeline driver itself raises. Per-net routing failures are
/// not fatal here: they are collected into the route result and surface as
/// connectivity issues in the validation report, per the infeasibility
/// propagation policy.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    ZoneSynth(#[from] ZoneSynthError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

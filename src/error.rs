//! The top-level error taxonomy: every stage's error type wrapped under one
//! enum via `#[from]`, matching the teacher corpus's `aion_config::ConfigError`
//! style. The library crate exposes this typed error; the CLI binary wraps
//! it in `eyre::Report` at the application boundary.
use thiserror::Error;

use crate::backend::BackendError;
use crate::config::ConfigError;
use crate::netlist::error::{ImportError, NetlistError};
use crate::pipeline::PipelineError;
use crate::registry::RegistryError;

/// Every error the core pipeline can return, aggregated for callers that
/// want one `Result` type from netlist ingestion through to a finalized
/// board. Per §7's propagation policy, routing infeasibility for individual
/// nets and validation issues are never represented here — they are data
/// inside the final report, not errors.
#[derive(Debug, Error)]
pub enum AudioPcbError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Netlist(#[from] NetlistError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

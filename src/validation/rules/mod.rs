//! Validator modules as capability values: each implements `id`, `category`,
//! and a pure `run(&BoardView) -> Vec<Issue>`. The engine holds a
//! `Vec<Box<dyn ValidationRule>>` built in catalog order and dispatches
//! uniformly — replacing the inheritance hierarchy a validator-per-subclass
//! design would otherwise need, per the Design Notes' capability directive.
pub mod audio;
pub mod connectivity;
pub mod drc;
pub mod emi;
pub mod ground;
pub mod manufacturing;
pub mod power;
pub mod signal_integrity;
pub mod thermal;

use crate::validation::issue::{Category, Issue};
use crate::validation::BoardView;

pub trait ValidationRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn category(&self) -> Category;
    fn run(&self, view: &BoardView) -> Vec<Issue>;
}

/// The catalog in its fixed declared order: geometric DRC, connectivity,
/// power, ground, signal integrity, EMI/EMC, thermal, audio-specific,
/// manufacturing. Remediation priority (§5) reads connectivity and
/// clearance ahead of density and audio-specific, independent of this
/// dispatch order; this order only fixes how results are merged back after
/// parallel dispatch.
pub fn default_catalog() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(drc::GeometricDrcRule),
        Box::new(connectivity::ConnectivityRule),
        Box::new(power::PowerDistributionRule),
        Box::new(ground::GroundRule),
        Box::new(signal_integrity::SignalIntegrityRule),
        Box::new(emi::EmiRule),
        Box::new(thermal::ThermalRule),
        Box::new(audio::AudioSpecificRule),
        Box::new(manufacturing::ManufacturingRule),
    ]
}

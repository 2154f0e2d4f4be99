//! The Component Model Registry: resolves symbolic component kinds to
//! physical footprint identifiers, pin maps, reference-designator prefixes,
//! and audio-specific overrides. Pure data + lookup; performs no geometry.
pub mod data;
pub mod error;

use std::collections::BTreeMap;

use crate::model::component::Kind;
pub use crate::registry::data::FootprintRecord;
pub use crate::registry::error::RegistryError;

/// Immutable after construction; held by shared reference and may be shared
/// freely across the pipeline and validation workers.
#[derive(Debug, Default)]
pub struct Registry {
    prefer_through_hole: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self { prefer_through_hole: true }
    }

    pub fn with_prefer_through_hole(prefer_through_hole: bool) -> Self {
        Self { prefer_through_hole }
    }

    /// Resolves `kind`/`package` to a concrete footprint record. Consults the
    /// audio through-hole override first when `prefer_through_hole` is set
    /// and no explicit package was requested.
    pub fn resolve(&self, kind: &Kind, package: Option<&str>) -> Result<FootprintRecord, RegistryError> {
        if package.is_none() {
            if let Some(record) = self.audio_override(kind) {
                return Ok(record);
            }
        }
        data::resolve(kind, package).ok_or_else(|| {
            package.map_or_else(
                || RegistryError::unknown_kind(kind),
                |p| RegistryError::unknown_package(kind, p),
            )
        })
    }

    /// Deterministic pin-number to pin-name table for `kind`, keyed by pin
    /// count where a kind has multiple package sizes (op-amps).
    pub fn pin_map_of(&self, kind: &Kind, pin_count: Option<u32>) -> BTreeMap<u32, String> {
        if let Kind::Opamp(variant) = kind {
            let pc = pin_count.unwrap_or(if matches!(variant, crate::model::component::OpampVariant::Quad) {
                14
            } else {
                8
            });
            return data::opamp_pin_map(*variant, pc);
        }
        data::resolve(kind, None).map(|r| r.pin_map).unwrap_or_default()
    }

    /// Consulted first when `prefer_through_hole` is set (default true for
    /// audio): through-hole variants reduce noise and ease hand assembly.
    pub fn audio_override(&self, kind: &Kind) -> Option<FootprintRecord> {
        if !self.prefer_through_hole || !kind.is_audio_override_eligible() {
            return None;
        }
        let footprint_id = data::audio_override_footprint_id(kind)?;
        let base = data::resolve(kind, None)?;
        Some(FootprintRecord { footprint_id: footprint_id.to_string(), ..base })
    }
}

impl Kind {
    /// Kinds with a documented through-hole variant worth preferring for
    /// audio builds, independent of whether the kind is itself "audio" for
    /// net classification purposes.
    fn is_audio_override_eligible(&self) -> bool {
        data::audio_override_footprint_id(self).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::component::{CapacitorVariant, OpampVariant};

    #[test]
    fn every_closed_kind_resolves() {
        let registry = Registry::new();
        let kinds = [
            Kind::Resistor,
            Kind::Capacitor(CapacitorVariant::Ceramic),
            Kind::Opamp(OpampVariant::Dual),
            Kind::Jack(crate::model::component::JackVariant::Mm35),
        ];
        for kind in kinds {
            let record = registry.resolve(&kind, None).unwrap();
            assert!(!record.footprint_id.is_empty());
        }
    }

    /// §8's registry totality property: every kind in the closed set
    /// resolves with a non-empty pin map, not just a non-empty footprint
    /// id. A kind with an empty pin map can never be the target of
    /// `Netlist::connect`, which validates pins against this table.
    #[test]
    fn every_closed_kind_resolves_with_a_non_empty_pin_map() {
        use crate::model::component::{JackVariant, TransistorVariant};

        let registry = Registry::new();
        let kinds = [
            Kind::Resistor,
            Kind::Capacitor(CapacitorVariant::Electrolytic),
            Kind::Inductor,
            Kind::Diode,
            Kind::Led,
            Kind::Transistor(TransistorVariant::Bjt),
            Kind::Opamp(OpampVariant::Single),
            Kind::Opamp(OpampVariant::Dual),
            Kind::Opamp(OpampVariant::Quad),
            Kind::IcGeneric,
            Kind::Potentiometer,
            Kind::Switch,
            Kind::Jack(JackVariant::Mm35),
            Kind::Jack(JackVariant::Mm635),
            Kind::Jack(JackVariant::Xlr),
            Kind::Speaker,
            Kind::FerriteBead,
            Kind::Crystal,
            Kind::Oscillator,
            Kind::Relay,
            Kind::Transformer,
            Kind::Tube,
            Kind::Regulator,
            Kind::Dac,
            Kind::Adc,
            Kind::Vco,
            Kind::Vcf,
            Kind::Vca,
            Kind::Logic,
            Kind::Timer,
            Kind::MountingHole,
        ];
        for kind in kinds {
            let record = registry.resolve(&kind, None).unwrap_or_else(|e| panic!("{kind:?} failed to resolve: {e}"));
            assert!(!record.pin_map.is_empty(), "{kind:?} resolved with an empty pin map");
        }
    }

    #[test]
    fn audio_override_prefers_dip_for_dual_opamp() {
        let registry = Registry::new();
        let record = registry.resolve(&Kind::Opamp(OpampVariant::Dual), None).unwrap();
        assert_eq!(record.footprint_id, "dip-8");
    }

    #[test]
    fn disabling_through_hole_preference_uses_smd_default() {
        let registry = Registry::with_prefer_through_hole(false);
        let record = registry.resolve(&Kind::Opamp(OpampVariant::Dual), None).unwrap();
        assert_eq!(record.footprint_id, "soic-8");
    }

    #[test]
    fn unknown_package_is_rejected() {
        let registry = Registry::new();
        let err = registry.resolve(&Kind::Resistor, Some("bogus")).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownPackage { .. }));
    }

    #[test]
    fn pin_map_of_quad_opamp_has_fourteen_entries_worth_of_pins() {
        let registry = Registry::new();
        let pins = registry.pin_map_of(&Kind::Opamp(OpampVariant::Quad), Some(14));
        assert_eq!(pins.len(), 14);
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::ids::{ComponentId, ReferenceDesignator};
use crate::model::pt::Pt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum CapacitorVariant {
    Electrolytic,
    Film,
    Ceramic,
    Tantalum,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum TransistorVariant {
    Bjt,
    Jfet,
    Mosfet,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum OpampVariant {
    Single,
    Dual,
    Quad,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum JackVariant {
    #[strum(serialize = "3.5mm")]
    Mm35,
    #[strum(serialize = "6.35mm")]
    Mm635,
    Xlr,
}

/// The closed set of component kinds the registry knows how to resolve.
/// Replaces dynamic attribute lookup on a generic component object: an
/// unknown kind is rejected at netlist ingestion, never discovered later in
/// placement or routing.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Kind {
    Resistor,
    Capacitor(CapacitorVariant),
    Inductor,
    Diode,
    Led,
    Transistor(TransistorVariant),
    Opamp(OpampVariant),
    IcGeneric,
    Potentiometer,
    Switch,
    Jack(JackVariant),
    Speaker,
    FerriteBead,
    Crystal,
    Oscillator,
    Relay,
    Transformer,
    Tube,
    Regulator,
    Dac,
    Adc,
    Vco,
    Vcf,
    Vca,
    Logic,
    Timer,
    MountingHole,
}

impl Kind {
    /// The reference-designator prefix for this kind, per the registry's
    /// prefix table (R, C, L, D, LED, Q, U, RV, SW, J, XLR, SPK, FB, XTAL,
    /// OSC, RLY, T, V, REG).
    pub const fn reference_prefix(&self) -> &'static str {
        match self {
            Kind::Resistor => "R",
            Kind::Capacitor(_) => "C",
            Kind::Inductor => "L",
            Kind::Diode => "D",
            Kind::Led => "LED",
            Kind::Transistor(_) => "Q",
            Kind::Opamp(_) | Kind::IcGeneric | Kind::Dac | Kind::Adc | Kind::Vco | Kind::Vcf
            | Kind::Vca | Kind::Logic | Kind::Timer => "U",
            Kind::Regulator => "REG",
            Kind::Potentiometer => "RV",
            Kind::Switch => "SW",
            Kind::Jack(JackVariant::Xlr) => "XLR",
            Kind::Jack(_) => "J",
            Kind::Speaker => "SPK",
            Kind::FerriteBead => "FB",
            Kind::Crystal => "XTAL",
            Kind::Oscillator => "OSC",
            Kind::Relay => "RLY",
            Kind::Transformer => "T",
            Kind::Tube => "V",
            Kind::MountingHole => "MH",
        }
    }

    /// A stable lowercase name for this kind, used as a registry lookup key
    /// and in error messages. Distinct from the reference prefix.
    pub const fn name(&self) -> &'static str {
        match self {
            Kind::Resistor => "resistor",
            Kind::Capacitor(CapacitorVariant::Electrolytic) => "capacitor-electrolytic",
            Kind::Capacitor(CapacitorVariant::Film) => "capacitor-film",
            Kind::Capacitor(CapacitorVariant::Ceramic) => "capacitor-ceramic",
            Kind::Capacitor(CapacitorVariant::Tantalum) => "capacitor-tantalum",
            Kind::Inductor => "inductor",
            Kind::Diode => "diode",
            Kind::Led => "led",
            Kind::Transistor(TransistorVariant::Bjt) => "transistor-bjt",
            Kind::Transistor(TransistorVariant::Jfet) => "transistor-jfet",
            Kind::Transistor(TransistorVariant::Mosfet) => "transistor-mosfet",
            Kind::Opamp(OpampVariant::Single) => "opamp-single",
            Kind::Opamp(OpampVariant::Dual) => "opamp-dual",
            Kind::Opamp(OpampVariant::Quad) => "opamp-quad",
            Kind::IcGeneric => "ic-generic",
            Kind::Potentiometer => "potentiometer",
            Kind::Switch => "switch",
            Kind::Jack(JackVariant::Mm35) => "jack-3.5mm",
            Kind::Jack(JackVariant::Mm635) => "jack-6.35mm",
            Kind::Jack(JackVariant::Xlr) => "jack-xlr",
            Kind::Speaker => "speaker",
            Kind::FerriteBead => "ferrite-bead",
            Kind::Crystal => "crystal",
            Kind::Oscillator => "oscillator",
            Kind::Relay => "relay",
            Kind::Transformer => "transformer",
            Kind::Tube => "tube",
            Kind::Regulator => "regulator",
            Kind::Dac => "dac",
            Kind::Adc => "adc",
            Kind::Vco => "vco",
            Kind::Vcf => "vcf",
            Kind::Vca => "vca",
            Kind::Logic => "logic",
            Kind::Timer => "timer",
            Kind::MountingHole => "mounting-hole",
        }
    }

    /// Whether this kind is treated as "audio" for the purposes of net
    /// classification and through-hole audio overrides.
    pub const fn is_audio(&self) -> bool {
        matches!(
            self,
            Kind::Opamp(_) | Kind::Jack(_) | Kind::Speaker | Kind::Vco | Kind::Vcf | Kind::Vca | Kind::Tube
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum LayerSide {
    Top,
    Bottom,
}

impl Default for LayerSide {
    fn default() -> Self {
        Self::Top
    }
}

/// A single pin of a padstack, positioned relative to the component origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub number: u32,
    pub name: String,
    pub p: Pt,
}

/// A placed (or not-yet-placed) component in the netlist/board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub kind: Kind,
    pub value: String,
    pub package: Option<String>,
    pub footprint_id: String,
    pub pins: BTreeMap<u32, Pin>,
    pub reference: ReferenceDesignator,
    pub position: Option<Pt>,
    pub rotation_deg: f64,
    pub layer_side: LayerSide,
}

impl Component {
    pub fn pin_named(&self, name: &str) -> Option<&Pin> {
        self.pins.values().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xlr_jack_uses_its_own_prefix() {
        assert_eq!(Kind::Jack(JackVariant::Xlr).reference_prefix(), "XLR");
        assert_eq!(Kind::Jack(JackVariant::Mm35).reference_prefix(), "J");
    }

    #[test]
    fn opamp_and_jack_are_audio_kinds() {
        assert!(Kind::Opamp(OpampVariant::Dual).is_audio());
        assert!(!Kind::Resistor.is_audio());
    }
}

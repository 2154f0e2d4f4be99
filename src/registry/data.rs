//! The declarative footprint/pin-map/prefix table the registry resolves
//! against. Pure data: no geometry, no I/O.
use std::collections::BTreeMap;

use crate::model::component::{CapacitorVariant, JackVariant, Kind, OpampVariant, TransistorVariant};
use crate::model::sz::Sz;

/// A resolved footprint: its id, pin map, reference prefix, and default
/// orthogonal rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintRecord {
    pub footprint_id: String,
    pub pin_map: BTreeMap<u32, String>,
    pub reference_prefix: &'static str,
    pub default_rotation_deg: f64,
}

fn pin_map(pairs: &[(u32, &str)]) -> BTreeMap<u32, String> {
    pairs.iter().map(|&(n, name)| (n, name.to_string())).collect()
}

fn two_pin_map() -> BTreeMap<u32, String> {
    pin_map(&[(1, "1"), (2, "2")])
}

/// A numbered pin map sized to a footprint's pin count, for kinds whose
/// pin functions aren't modeled per-variant here. Keeps registry totality
/// (every resolvable kind gets a non-empty, connectable pin map) without
/// inventing function names this pipeline has no use for.
fn sequential_pin_map(pin_count: u32) -> BTreeMap<u32, String> {
    (1..=pin_count).map(|n| (n, n.to_string())).collect()
}

/// Keyed by pin count: 8-pin single/dual, 14-pin quad op-amp packages.
pub fn opamp_pin_map(variant: OpampVariant, pin_count: u32) -> BTreeMap<u32, String> {
    match (variant, pin_count) {
        (OpampVariant::Single, 8) => {
            pin_map(&[(1, "OUT"), (2, "IN-"), (3, "IN+"), (4, "V-"), (8, "V+")])
        }
        (OpampVariant::Dual, 8) => pin_map(&[
            (1, "OUT1"),
            (2, "IN1-"),
            (3, "IN1+"),
            (4, "V-"),
            (5, "IN2+"),
            (6, "IN2-"),
            (7, "OUT2"),
            (8, "V+"),
        ]),
        (OpampVariant::Quad, 14) => pin_map(&[
            (1, "OUT1"),
            (2, "IN1-"),
            (3, "IN1+"),
            (4, "V+"),
            (5, "IN2+"),
            (6, "IN2-"),
            (7, "OUT2"),
            (8, "OUT3"),
            (9, "IN3-"),
            (10, "IN3+"),
            (11, "V-"),
            (12, "IN4+"),
            (13, "IN4-"),
            (14, "OUT4"),
        ]),
        _ => opamp_pin_map(variant, default_pin_count(variant)),
    }
}

const fn default_pin_count(variant: OpampVariant) -> u32 {
    match variant {
        OpampVariant::Single | OpampVariant::Dual => 8,
        OpampVariant::Quad => 14,
    }
}

fn transistor_pin_map(variant: TransistorVariant) -> BTreeMap<u32, String> {
    match variant {
        TransistorVariant::Bjt => pin_map(&[(1, "E"), (2, "B"), (3, "C")]),
        TransistorVariant::Jfet => pin_map(&[(1, "S"), (2, "G"), (3, "D")]),
        TransistorVariant::Mosfet => pin_map(&[(1, "S"), (2, "G"), (3, "D")]),
    }
}

fn jack_pin_map(variant: JackVariant) -> BTreeMap<u32, String> {
    match variant {
        JackVariant::Mm35 | JackVariant::Mm635 => pin_map(&[(1, "TIP"), (2, "RING"), (3, "SLEEVE")]),
        JackVariant::Xlr => pin_map(&[(1, "GND"), (2, "HOT"), (3, "COLD")]),
    }
}

/// Through-hole footprint ids selected when `prefer_through_hole` is set,
/// reducing noise and easing hand assembly for audio builds.
pub fn audio_override_footprint_id(kind: &Kind) -> Option<&'static str> {
    match kind {
        Kind::Resistor => Some("resistor-axial-th"),
        Kind::Capacitor(CapacitorVariant::Electrolytic) => Some("capacitor-radial-th"),
        Kind::Capacitor(CapacitorVariant::Film) => Some("capacitor-film-box-th"),
        Kind::Opamp(OpampVariant::Single | OpampVariant::Dual) => Some("dip-8"),
        Kind::Opamp(OpampVariant::Quad) => Some("dip-14"),
        _ => None,
    }
}

/// Resolves the base footprint record for a kind, ignoring any audio
/// override. `package` selects among the kind's known variants, if any;
/// `None` always succeeds with the kind's default package.
pub fn resolve(kind: &Kind, package: Option<&str>) -> Option<FootprintRecord> {
    let prefix = kind.reference_prefix();
    let (footprint_id, pin_map, default_rotation_deg): (String, BTreeMap<u32, String>, f64) = match kind {
        Kind::Resistor => (package_or("resistor-smd-0805", package)?, two_pin_map(), 0.0),
        Kind::Capacitor(v) => {
            (package_or(default_capacitor_footprint(*v), package)?, two_pin_map(), 0.0)
        }
        Kind::Inductor => (package_or("inductor-smd", package)?, two_pin_map(), 0.0),
        Kind::Diode => (package_or("diode-sod123", package)?, two_pin_map(), 0.0),
        Kind::Led => (package_or("led-3mm-th", package)?, two_pin_map(), 0.0),
        Kind::Transistor(v) => {
            (package_or("to92", package)?, transistor_pin_map(*v), 0.0)
        }
        Kind::Opamp(v) => {
            let pc = default_pin_count(*v);
            (package_or(if pc == 8 { "soic-8" } else { "soic-14" }, package)?, opamp_pin_map(*v, pc), 0.0)
        }
        Kind::IcGeneric => (package_or("soic-8", package)?, sequential_pin_map(8), 0.0),
        Kind::Potentiometer => (package_or("potentiometer-9mm", package)?, pin_map(&[(1, "1"), (2, "WIPER"), (3, "2")]), 0.0),
        Kind::Switch => (package_or("switch-th", package)?, two_pin_map(), 0.0),
        Kind::Jack(v) => (package_or(jack_footprint_id(*v), package)?, jack_pin_map(*v), 0.0),
        Kind::Speaker => (package_or("speaker-terminal", package)?, two_pin_map(), 0.0),
        Kind::FerriteBead => (package_or("ferrite-bead-smd", package)?, two_pin_map(), 0.0),
        Kind::Crystal => (package_or("crystal-hc49", package)?, two_pin_map(), 0.0),
        Kind::Oscillator => (package_or("oscillator-smd", package)?, pin_map(&[(1, "GND"), (2, "OUT"), (3, "NC"), (4, "VDD")]), 0.0),
        Kind::Relay => (package_or("relay-th", package)?, sequential_pin_map(5), 0.0),
        Kind::Transformer => (package_or("transformer-th", package)?, sequential_pin_map(4), 0.0),
        Kind::Tube => (package_or("tube-octal", package)?, sequential_pin_map(8), 0.0),
        Kind::Regulator => (package_or("to220", package)?, pin_map(&[(1, "IN"), (2, "GND"), (3, "OUT")]), 0.0),
        Kind::Dac | Kind::Adc => (package_or("soic-16", package)?, sequential_pin_map(16), 0.0),
        Kind::Vco | Kind::Vcf | Kind::Vca => (package_or("soic-16", package)?, sequential_pin_map(16), 0.0),
        Kind::Logic => (package_or("soic-14", package)?, sequential_pin_map(14), 0.0),
        Kind::Timer => (package_or("dip-8", package)?, sequential_pin_map(8), 0.0),
        Kind::MountingHole => (package_or("mounting-hole-m3", package)?, sequential_pin_map(1), 0.0),
    };
    Some(FootprintRecord { footprint_id, pin_map, reference_prefix: prefix, default_rotation_deg })
}

const fn default_capacitor_footprint(variant: CapacitorVariant) -> &'static str {
    match variant {
        CapacitorVariant::Electrolytic => "capacitor-radial-smd",
        CapacitorVariant::Film => "capacitor-film-smd",
        CapacitorVariant::Ceramic => "capacitor-smd-0603",
        CapacitorVariant::Tantalum => "capacitor-tantalum-smd",
    }
}

const fn jack_footprint_id(variant: JackVariant) -> &'static str {
    match variant {
        JackVariant::Mm35 => "jack-3.5mm-th",
        JackVariant::Mm635 => "jack-6.35mm-th",
        JackVariant::Xlr => "jack-xlr-th",
    }
}

/// Nominal footprint outline size, in millimetres, used by the placement
/// engine for overlap and containment checks. Approximate: a complete
/// footprint library is out of scope; these are representative through-hole
/// and SMD land-pattern sizes for the kinds this pipeline places.
pub fn footprint_size(footprint_id: &str) -> Sz {
    match footprint_id {
        "resistor-axial-th" => Sz::new(7.0, 2.5),
        "resistor-smd-0805" => Sz::new(2.0, 1.25),
        "capacitor-radial-th" => Sz::new(5.0, 5.0),
        "capacitor-radial-smd" => Sz::new(4.0, 4.0),
        "capacitor-film-box-th" => Sz::new(7.5, 3.5),
        "capacitor-film-smd" => Sz::new(5.0, 3.0),
        "capacitor-smd-0603" => Sz::new(1.6, 0.8),
        "capacitor-tantalum-smd" => Sz::new(3.2, 1.6),
        "inductor-smd" => Sz::new(4.0, 4.0),
        "diode-sod123" => Sz::new(2.7, 1.4),
        "led-3mm-th" => Sz::new(3.0, 3.0),
        "to92" => Sz::new(5.0, 4.0),
        "dip-8" => Sz::new(9.0, 7.5),
        "dip-14" => Sz::new(19.0, 7.5),
        "soic-8" => Sz::new(5.0, 4.0),
        "soic-14" => Sz::new(8.7, 4.0),
        "soic-16" => Sz::new(10.0, 4.0),
        "potentiometer-9mm" => Sz::new(9.0, 9.0),
        "switch-th" => Sz::new(6.0, 6.0),
        "jack-3.5mm-th" => Sz::new(12.0, 10.0),
        "jack-6.35mm-th" => Sz::new(16.0, 14.0),
        "jack-xlr-th" => Sz::new(24.0, 24.0),
        "speaker-terminal" => Sz::new(10.0, 6.0),
        "ferrite-bead-smd" => Sz::new(3.2, 1.6),
        "crystal-hc49" => Sz::new(11.5, 4.5),
        "oscillator-smd" => Sz::new(7.0, 5.0),
        "relay-th" => Sz::new(20.0, 10.0),
        "transformer-th" => Sz::new(25.0, 20.0),
        "tube-octal" => Sz::new(30.0, 30.0),
        "to220" => Sz::new(10.0, 4.5),
        "mounting-hole-m3" => Sz::new(3.2, 3.2),
        _ => Sz::new(5.0, 5.0),
    }
}

/// Approximate in-package offset of pin `pin_number` (of `pin_count` total)
/// from the footprint's center, in millimetres. Distance-based checks like
/// the decoupling-capacitor rule need the pin's actual location, not the
/// component's centroid. Dual-row IC packages get the standard layout: pins
/// split evenly between the left and right long edges, numbered down one
/// side and up the other. Two-terminal parts get their leads on the long
/// axis. Anything else (connectors, mechanical parts) has no meaningful
/// internal pin geometry here and keeps the centroid.
pub fn pin_offset(footprint_id: &str, pin_number: u32, pin_count: usize) -> crate::model::pt::Pt {
    use crate::model::pt::Pt;

    let is_dual_row_ic = matches!(footprint_id, "dip-8" | "dip-14" | "soic-8" | "soic-14" | "soic-16");
    if is_dual_row_ic && pin_count >= 4 {
        let size = footprint_size(footprint_id);
        let half = pin_count as u32 / 2;
        let half_w = size.w / 2.0;
        let row_pitch = size.h / (half as f64 + 1.0);
        return if pin_number <= half {
            Pt::new(-half_w, -size.h / 2.0 + pin_number as f64 * row_pitch)
        } else {
            let row = pin_number - half;
            Pt::new(half_w, size.h / 2.0 - row as f64 * row_pitch)
        };
    }
    if pin_count == 2 {
        let size = footprint_size(footprint_id);
        let half_w = size.w / 2.0;
        return if pin_number == 1 { Pt::new(-half_w, 0.0) } else { Pt::new(half_w, 0.0) };
    }
    Pt::zero()
}

#[cfg(test)]
mod pin_offset_tests {
    use super::*;

    #[test]
    fn dip8_power_pins_sit_on_opposite_corners() {
        let v_minus = pin_offset("dip-8", 4, 8);
        let v_plus = pin_offset("dip-8", 8, 8);
        assert!(v_minus.x < 0.0);
        assert!(v_plus.x > 0.0);
        assert!((v_minus.x - (-v_plus.x)).abs() < 1e-9);
    }

    #[test]
    fn two_terminal_part_has_leads_on_the_long_axis() {
        let size = footprint_size("resistor-axial-th");
        let p1 = pin_offset("resistor-axial-th", 1, 2);
        let p2 = pin_offset("resistor-axial-th", 2, 2);
        assert!((p1.x - (-size.w / 2.0)).abs() < 1e-9);
        assert!((p2.x - size.w / 2.0).abs() < 1e-9);
        assert_eq!(p1.y, 0.0);
    }

    #[test]
    fn single_pad_part_keeps_the_centroid() {
        assert!(pin_offset("jack-3.5mm-th", 1, 3).is_zero());
    }
}

/// `package == None` picks the kind's default; otherwise `package` must
/// match `default`. Every kind here has exactly one known non-default
/// package family today (audio overrides are handled separately), so any
/// other string fails resolution.
fn package_or(default: &str, package: Option<&str>) -> Option<String> {
    match package {
        None => Some(default.to_string()),
        Some(p) if p == default => Some(default.to_string()),
        Some(_) => None,
    }
}

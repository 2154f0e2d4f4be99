//! Power distribution: plane coverage, estimated voltage drop and current
//! density on power tracks, and decoupling-capacitor presence near every
//! active IC's power pin.
use crate::model::component::Kind;
use crate::model::net::SignalClass;
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

/// 1oz copper (35 micron) annealed copper resistivity, in ohm*mm. Used only
/// to rank tracks against the configured thresholds, not as a certified
/// electrical simulation.
const COPPER_RESISTIVITY_OHM_MM: f64 = 1.7e-5;
const COPPER_THICKNESS_MM: f64 = 0.035;
/// Assumed nominal current for the voltage-drop/current-density proxy when
/// the netlist carries no per-net current annotation.
const ASSUMED_CURRENT_A: f64 = 0.5;

pub(crate) fn active_ic_kinds(kind: &Kind) -> bool {
    matches!(
        kind,
        Kind::Opamp(_)
            | Kind::IcGeneric
            | Kind::Dac
            | Kind::Adc
            | Kind::Vco
            | Kind::Vcf
            | Kind::Vca
            | Kind::Logic
            | Kind::Timer
            | Kind::Regulator
    )
}

pub(crate) fn is_power_pin_name(name: &str) -> bool {
    let upper = name.to_uppercase();
    ["V+", "V-", "VDD", "VCC", "VSS", "VEE"].iter().any(|p| upper == *p)
}

pub struct PowerDistributionRule;

impl ValidationRule for PowerDistributionRule {
    fn id(&self) -> &'static str {
        "power-distribution"
    }

    fn category(&self) -> Category {
        Category::PowerDistribution
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_plane_coverage(view));
        issues.extend(check_voltage_drop_and_density(view));
        issues.extend(check_decoupling(view));
        issues
    }
}

fn check_plane_coverage(view: &BoardView) -> Vec<Issue> {
    let board_area = view.board.width_mm * view.board.height_mm;
    if board_area <= 0.0 {
        return Vec::new();
    }
    let mut power_area = 0.0;
    let mut has_power_net = false;
    for net in view.netlist.nets() {
        if net.signal_class == SignalClass::Power {
            has_power_net = true;
        }
    }
    if !has_power_net {
        return Vec::new();
    }
    for zone in &view.board.zones {
        if view.netlist.net(zone.net).map(|n| n.signal_class) == Some(SignalClass::Power) {
            power_area += zone.area_mm2();
        }
    }
    let coverage = power_area / board_area;
    if coverage + 1e-9 < view.config.validation.min_power_plane_coverage {
        vec![Issue::new(
            Severity::Error,
            Category::PowerDistribution,
            format!(
                "power plane covers {:.0}% of the board, below the required {:.0}%",
                coverage * 100.0,
                view.config.validation.min_power_plane_coverage * 100.0
            ),
        )
        .with_suggestion("widen the power pour's free region or relax foreign-net clearance")
        .with_doc_ref("validation.power.plane-coverage")]
    } else {
        Vec::new()
    }
}

fn check_voltage_drop_and_density(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for track in &view.board.tracks {
        let Some(net) = view.netlist.net(track.net) else { continue };
        if net.signal_class != SignalClass::Power {
            continue;
        }
        let length_mm = track.length_mm();
        let cross_section = track.width_mm * COPPER_THICKNESS_MM;
        if cross_section <= 0.0 {
            continue;
        }
        let resistance_ohm = COPPER_RESISTIVITY_OHM_MM * length_mm / cross_section;
        let drop_v = resistance_ohm * ASSUMED_CURRENT_A;
        if drop_v > view.config.validation.max_voltage_drop_v {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::PowerDistribution,
                    format!("estimated voltage drop on power net '{}' is {:.3}V, above the {:.3}V limit", net.name, drop_v, view.config.validation.max_voltage_drop_v),
                )
                .with_suggestion("shorten the power track or increase its width")
                .with_net(net.name.clone())
                .with_doc_ref("validation.power.voltage-drop"),
            );
        }
        let density = ASSUMED_CURRENT_A / cross_section;
        if density > view.config.validation.max_current_density_a_per_mm2 {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::PowerDistribution,
                    format!(
                        "estimated current density on power net '{}' is {:.2}A/mm^2, above the {:.2}A/mm^2 limit",
                        net.name, density, view.config.validation.max_current_density_a_per_mm2
                    ),
                )
                .with_suggestion("widen the power track")
                .with_net(net.name.clone())
                .with_doc_ref("validation.power.current-density"),
            );
        }
    }
    issues
}

/// A pin with no net endpoint carries no current and needs no local
/// decoupling; only pins the netlist actually wires are checked.
fn pin_is_wired(view: &BoardView, component_id: crate::model::ids::ComponentId, pin: &crate::model::component::Pin) -> bool {
    view.netlist
        .nets()
        .iter()
        .any(|net| net.endpoints.iter().any(|e| e.component == component_id && (e.pin == pin.name || e.pin == pin.number.to_string())))
}

fn check_decoupling(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let decoupling_distance = view.config.placement.decoupling_cap_distance_mm;
    let capacitor_positions: Vec<_> =
        view.netlist.components().iter().filter(|c| matches!(c.kind, Kind::Capacitor(_))).filter_map(|c| c.position).collect();

    for component in view.netlist.components() {
        if !active_ic_kinds(&component.kind) {
            continue;
        }
        let Some(center) = component.position else { continue };
        for pin in component.pins.values() {
            if !is_power_pin_name(&pin.name) || !pin_is_wired(view, component.id, pin) {
                continue;
            }
            let pin_pos = center.offset(pin.p.x, pin.p.y);
            let has_nearby_decoupling = capacitor_positions.iter().any(|&cap_pos| cap_pos.dist(pin_pos) <= decoupling_distance);
            if !has_nearby_decoupling {
                issues.push(
                    Issue::new(
                        Severity::Error,
                        Category::PowerDistribution,
                        format!("{} power pin '{}' has no decoupling capacitor within {:.1}mm", component.reference, pin.name, decoupling_distance),
                    )
                    .with_suggestion("place a decoupling capacitor closer to this power pin")
                    .with_component(component.id)
                    .with_doc_ref("validation.power.decoupling"),
                );
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};
    use crate::model::component::{CapacitorVariant, OpampVariant};
    use crate::model::pt::Pt;
    use crate::netlist::Netlist;
    use crate::registry::Registry;

    #[test]
    fn opamp_without_nearby_decoupling_cap_is_flagged() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let u1 = netlist.add_component(&registry, Kind::Opamp(OpampVariant::Dual), "TL072", None).unwrap();
        netlist.component_mut(u1).unwrap().position = Some(Pt::new(10.0, 10.0));
        let vcc = netlist.add_net("VCC", Some(crate::model::net::SignalClass::Power)).unwrap();
        netlist.connect(vcc, u1, "8").unwrap();

        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = PowerDistributionRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.power.decoupling")));
    }

    /// An unconnected power pin (the floating `V-` here) carries no current
    /// and is never flagged, independent of any capacitor's position.
    #[test]
    fn unwired_power_pin_is_not_flagged() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let u1 = netlist.add_component(&registry, Kind::Opamp(OpampVariant::Dual), "TL072", None).unwrap();
        netlist.component_mut(u1).unwrap().position = Some(Pt::new(10.0, 10.0));

        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = PowerDistributionRule.run(&view);
        assert!(!issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.power.decoupling")));
    }

    #[test]
    fn nearby_decoupling_cap_satisfies_the_check() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let u1 = netlist.add_component(&registry, Kind::Opamp(OpampVariant::Dual), "TL072", None).unwrap();
        let center = Pt::new(10.0, 10.0);
        netlist.component_mut(u1).unwrap().position = Some(center);
        let vcc = netlist.add_net("VCC", Some(crate::model::net::SignalClass::Power)).unwrap();
        netlist.connect(vcc, u1, "8").unwrap();

        let c1 = netlist.add_component(&registry, Kind::Capacitor(CapacitorVariant::Ceramic), "100nF", None).unwrap();
        let pin8_offset = netlist.component(u1).unwrap().pins.get(&8).unwrap().p;
        netlist.component_mut(c1).unwrap().position = Some(center.offset(pin8_offset.x, pin8_offset.y + 0.5));

        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = PowerDistributionRule.run(&view);
        assert!(!issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.power.decoupling")));
    }
}

//! Component temperature estimate against the configured limit, thermal pad
//! area under dissipating parts, and crowding of dissipating components
//! within the density radius.
use crate::model::component::Kind;
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

/// Components whose kind plausibly dissipates meaningful heat on a pedal or
/// eurorack-scale board: regulators and power transistors.
fn dissipating_kind(kind: &Kind) -> bool {
    matches!(kind, Kind::Regulator | Kind::Transistor(_) | Kind::Tube)
}

/// Ambient board temperature assumed for the junction-temperature proxy, in
/// degrees Celsius.
const AMBIENT_C: f64 = 25.0;
/// Thermal resistance proxy for a TO-92/SOT-23-class part with no explicit
/// package thermal data, in degrees Celsius per watt.
const THETA_JA_C_PER_W: f64 = 150.0;
/// Assumed dissipated power for the proxy when the netlist carries no
/// per-component power annotation, in watts.
const ASSUMED_DISSIPATION_W: f64 = 0.25;

pub struct ThermalRule;

impl ValidationRule for ThermalRule {
    fn id(&self) -> &'static str {
        "thermal"
    }

    fn category(&self) -> Category {
        Category::Thermal
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_component_temperature(view));
        issues.extend(check_thermal_pad_area(view));
        issues.extend(check_density(view));
        issues
    }
}

fn check_component_temperature(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for component in view.netlist.components() {
        if !dissipating_kind(&component.kind) {
            continue;
        }
        let estimated_c = AMBIENT_C + ASSUMED_DISSIPATION_W * THETA_JA_C_PER_W;
        if estimated_c > view.config.validation.max_component_temp_c {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::Thermal,
                    format!("{} is estimated at {:.0}C, above the {:.0}C limit", component.reference, estimated_c, view.config.validation.max_component_temp_c),
                )
                .with_suggestion("add a thermal pad, heatsink, or move this component away from other dissipating parts")
                .with_component(component.id)
                .with_doc_ref("validation.thermal.component-temperature"),
            );
        }
    }
    issues
}

fn check_thermal_pad_area(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for component in view.netlist.components() {
        if !dissipating_kind(&component.kind) {
            continue;
        }
        let Some(center) = component.position else { continue };
        let nearby_pad_area: f64 = view
            .board
            .zones
            .iter()
            .filter(|z| z.outline.contains_pt(center))
            .map(|z| z.area_mm2())
            .sum();
        if nearby_pad_area < view.config.validation.min_thermal_pad_area_mm2 {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::Thermal,
                    format!(
                        "{} sits on {:.1}mm^2 of copper, below the {:.1}mm^2 thermal pad minimum",
                        component.reference, nearby_pad_area, view.config.validation.min_thermal_pad_area_mm2
                    ),
                )
                .with_suggestion("enlarge the copper pour under this component or add a dedicated thermal pad")
                .with_component(component.id)
                .with_doc_ref("validation.thermal.pad-area"),
            );
        }
    }
    issues
}

fn check_density(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let radius = view.config.validation.thermal_density_radius_mm;
    let dissipating: Vec<_> = view.netlist.components().iter().filter(|c| dissipating_kind(&c.kind)).filter_map(|c| c.position.map(|p| (c, p))).collect();
    for &(component, center) in &dissipating {
        let nearby = dissipating.iter().filter(|&&(_, p)| p != center && p.dist(center) <= radius).count() as u32;
        if nearby >= view.config.validation.max_dissipating_components {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::Thermal,
                    format!(
                        "{} has {} other dissipating component(s) within {:.1}mm, at or above the crowding limit of {}",
                        component.reference, nearby, radius, view.config.validation.max_dissipating_components
                    ),
                )
                .with_suggestion("spread dissipating components further apart")
                .with_component(component.id)
                .with_doc_ref("validation.thermal.density"),
            );
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};
    use crate::model::pt::Pt;
    use crate::netlist::Netlist;
    use crate::registry::Registry;

    #[test]
    fn regulator_without_nearby_copper_is_flagged() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let u1 = netlist.add_component(&registry, Kind::Regulator, "7812", None).unwrap();
        netlist.component_mut(u1).unwrap().position = Some(Pt::new(10.0, 10.0));
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = ThermalRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.thermal.pad-area")));
    }
}

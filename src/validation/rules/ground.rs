//! Ground plane coverage, ground loop area, per-IC ground connection count,
//! analog/digital separation, and star-grounding topology where declared.
use crate::model::component::Kind;
use crate::model::net::SignalClass;
use crate::model::rt::Rt;
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

fn active_ic_kinds(kind: &Kind) -> bool {
    matches!(
        kind,
        Kind::Opamp(_) | Kind::IcGeneric | Kind::Dac | Kind::Adc | Kind::Vco | Kind::Vcf | Kind::Vca | Kind::Logic | Kind::Timer
    )
}

pub struct GroundRule;

impl ValidationRule for GroundRule {
    fn id(&self) -> &'static str {
        "ground"
    }

    fn category(&self) -> Category {
        Category::Ground
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_plane_coverage(view));
        issues.extend(check_loop_area(view));
        issues.extend(check_connection_count(view));
        issues.extend(check_analog_digital_separation(view));
        issues.extend(check_star_topology(view));
        issues
    }
}

fn check_plane_coverage(view: &BoardView) -> Vec<Issue> {
    let board_area = view.board.width_mm * view.board.height_mm;
    if board_area <= 0.0 || !view.netlist.nets().iter().any(|n| n.signal_class == SignalClass::Ground) {
        return Vec::new();
    }
    let ground_area: f64 = view
        .board
        .zones
        .iter()
        .filter(|z| view.netlist.net(z.net).map(|n| n.signal_class) == Some(SignalClass::Ground))
        .map(|z| z.area_mm2())
        .sum();
    let coverage = ground_area / board_area;
    if coverage + 1e-9 < view.config.validation.min_ground_plane_coverage {
        vec![Issue::new(
            Severity::Error,
            Category::Ground,
            format!(
                "ground plane covers {:.0}% of the board, below the required {:.0}%",
                coverage * 100.0,
                view.config.validation.min_ground_plane_coverage * 100.0
            ),
        )
        .with_suggestion("relax foreign-net clearance or increase the board's ground layer allocation")
        .with_doc_ref("validation.ground.plane-coverage")]
    } else {
        Vec::new()
    }
}

fn check_loop_area(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for net in view.netlist.nets() {
        if net.signal_class != SignalClass::Ground {
            continue;
        }
        let mut bounds = Rt::empty();
        for track in view.tracks_of(net.id) {
            bounds = bounds.united(&track.path().bounds());
        }
        if bounds.is_empty() {
            continue;
        }
        let loop_area = bounds.area();
        if loop_area > view.config.validation.max_ground_loop_area_mm2 {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::Ground,
                    format!("ground net '{}' spans a {:.0}mm^2 bounding loop, above the {:.0}mm^2 limit", net.name, loop_area, view.config.validation.max_ground_loop_area_mm2),
                )
                .with_suggestion("route the ground return closer to its signal path or enable star grounding")
                .with_net(net.name.clone())
                .with_doc_ref("validation.ground.loop-area"),
            );
        }
    }
    issues
}

fn check_connection_count(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let required = view.config.validation.min_ground_connections_per_ic;
    for component in view.netlist.components() {
        if !active_ic_kinds(&component.kind) {
            continue;
        }
        let ground_pins = view
            .netlist
            .nets()
            .iter()
            .filter(|n| n.signal_class == SignalClass::Ground)
            .flat_map(|n| &n.endpoints)
            .filter(|e| e.component == component.id)
            .count() as u32;
        if ground_pins < required {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::Ground,
                    format!("{} has {} ground connection(s), below the required {}", component.reference, ground_pins, required),
                )
                .with_suggestion("connect another pin of this IC to ground")
                .with_component(component.id)
                .with_doc_ref("validation.ground.connection-count"),
            );
        }
    }
    issues
}

fn check_analog_digital_separation(view: &BoardView) -> Vec<Issue> {
    let agnd = view.netlist.nets().iter().find(|n| n.name.to_uppercase().starts_with("AGND"));
    let dgnd = view.netlist.nets().iter().find(|n| n.name.to_uppercase().starts_with("DGND"));
    let (Some(agnd), Some(dgnd)) = (agnd, dgnd) else { return Vec::new() };

    let mut issues = Vec::new();
    for component in view.netlist.components() {
        if matches!(component.kind, Kind::FerriteBead) {
            continue;
        }
        let touches_agnd = agnd.endpoints.iter().any(|e| e.component == component.id);
        let touches_dgnd = dgnd.endpoints.iter().any(|e| e.component == component.id);
        if touches_agnd && touches_dgnd {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::Ground,
                    format!("{} bridges analog ground and digital ground directly", component.reference),
                )
                .with_suggestion("join AGND and DGND through a ferrite bead or single star point instead")
                .with_component(component.id)
                .with_net(agnd.name.clone())
                .with_net(dgnd.name.clone())
                .with_doc_ref("validation.ground.analog-digital-separation"),
            );
        }
    }
    issues
}

fn check_star_topology(view: &BoardView) -> Vec<Issue> {
    let Some(nominated_pin) = &view.config.zones.star_ground_pin else { return Vec::new() };
    let mut issues = Vec::new();
    for zone in &view.board.zones {
        if view.netlist.net(zone.net).map(|n| n.signal_class) != Some(SignalClass::Ground) {
            continue;
        }
        if !zone.thermal_relief.star_grounding {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::Ground,
                    format!("star grounding was declared (pin '{nominated_pin}') but the ground zone has no resolved star point"),
                )
                .with_suggestion("confirm the nominated pin is an endpoint of a ground net")
                .with_doc_ref("validation.ground.star-topology"),
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
    use crate::model::component::OpampVariant;
    use crate::netlist::Netlist;
    use crate::registry::Registry;

    #[test]
    fn ic_with_no_ground_connection_is_flagged() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        netlist.add_component(&registry, Kind::Opamp(OpampVariant::Dual), "TL072", None).unwrap();
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = GroundRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.ground.connection-count")));
    }
}

//! Fabrication constraints: minimum hole/pad/silk/solder-mask/annular-ring
//! dimensions, test-point presence, fiducial count, and panelization
//! clearance.
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

pub struct ManufacturingRule;

impl ValidationRule for ManufacturingRule {
    fn id(&self) -> &'static str {
        "manufacturing"
    }

    fn category(&self) -> Category {
        Category::Manufacturing
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_via_geometry(view));
        issues.extend(check_track_silk_width(view));
        issues.extend(check_test_points(view));
        issues.extend(check_fiducials(view));
        issues.extend(check_panelization(view));
        issues
    }
}

fn check_via_geometry(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for via in &view.board.vias {
        let Some(net) = view.netlist.net(via.net) else { continue };
        if via.drill_mm + 1e-9 < view.config.validation.min_hole_mm {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::Manufacturing,
                    format!("via on net '{}' has a {:.3}mm drill, below the {:.3}mm minimum hole size", net.name, via.drill_mm, view.config.validation.min_hole_mm),
                )
                .with_suggestion("increase the via drill diameter")
                .with_net(net.name.clone())
                .with_doc_ref("validation.manufacturing.min-hole"),
            );
        }
        let annular_ring = (via.outer_diameter_mm - via.drill_mm) / 2.0;
        if annular_ring + 1e-9 < view.config.validation.min_annular_ring_mm {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::Manufacturing,
                    format!(
                        "via on net '{}' has a {:.3}mm annular ring, below the {:.3}mm minimum",
                        net.name, annular_ring, view.config.validation.min_annular_ring_mm
                    ),
                )
                .with_suggestion("increase the via's outer diameter or reduce its drill")
                .with_net(net.name.clone())
                .with_doc_ref("validation.manufacturing.annular-ring"),
            );
        }
        if via.outer_diameter_mm + 1e-9 < view.config.validation.min_pad_mm {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::Manufacturing,
                    format!("via on net '{}' has a {:.3}mm pad, below the {:.3}mm minimum pad size", net.name, via.outer_diameter_mm, view.config.validation.min_pad_mm),
                )
                .with_suggestion("increase the via's outer diameter")
                .with_net(net.name.clone())
                .with_doc_ref("validation.manufacturing.min-pad"),
            );
        }
    }
    issues
}

fn check_track_silk_width(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for track in &view.board.tracks {
        let Some(net) = view.netlist.net(track.net) else { continue };
        if track.width_mm + 1e-9 < view.config.validation.min_silk_mm {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::Manufacturing,
                    format!("track on net '{}' has width {:.3}mm, below the {:.3}mm fabricator minimum", net.name, track.width_mm, view.config.validation.min_silk_mm),
                )
                .with_suggestion("widen the track to the fabricator's minimum feature size")
                .with_net(net.name.clone())
                .with_doc_ref("validation.manufacturing.min-silk"),
            );
        }
    }
    issues
}

fn check_test_points(view: &BoardView) -> Vec<Issue> {
    if !view.config.validation.require_test_points {
        return Vec::new();
    }
    let has_test_point = view.netlist.components().iter().any(|c| c.reference.prefix == "TP");
    if has_test_point {
        Vec::new()
    } else {
        vec![Issue::new(Severity::Warning, Category::Manufacturing, "board declares no test points but the preset requires them".to_string())
            .with_suggestion("add at least one test point for bring-up and rework")
            .with_doc_ref("validation.manufacturing.test-points")]
    }
}

fn check_fiducials(view: &BoardView) -> Vec<Issue> {
    let fiducial_count = view.netlist.components().iter().filter(|c| c.reference.prefix == "FID").count() as u32;
    if fiducial_count < view.config.validation.min_fiducials {
        vec![Issue::new(
            Severity::Warning,
            Category::Manufacturing,
            format!("board has {} fiducial(s), below the required {}", fiducial_count, view.config.validation.min_fiducials),
        )
        .with_suggestion("add fiducials for automated pick-and-place alignment")
        .with_doc_ref("validation.manufacturing.fiducials")]
    } else {
        Vec::new()
    }
}

fn check_panelization(view: &BoardView) -> Vec<Issue> {
    if !view.config.validation.panelized {
        return Vec::new();
    }
    let panel_clearance_mm = view.board.design_rules.edge_clearance_mm.max(2.0);
    let inner = crate::model::rt::Rt::new(0.0, 0.0, view.board.width_mm, view.board.height_mm).inset(panel_clearance_mm, panel_clearance_mm);
    let mut issues = Vec::new();
    for track in &view.board.tracks {
        let Some(net) = view.netlist.net(track.net) else { continue };
        if track.pts.iter().any(|&p| !inner.contains(p)) {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::Manufacturing,
                    format!("track on net '{}' runs into the panelization clearance margin", net.name),
                )
                .with_net(net.name.clone())
                .with_doc_ref("validation.manufacturing.panelization"),
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
    use crate::model::ids::LayerId;
    use crate::model::pt::Pt;
    use crate::model::via::Via;
    use crate::netlist::Netlist;

    #[test]
    fn undersized_via_drill_is_flagged() {
        let mut netlist = Netlist::new();
        let net = netlist.add_net("GND", None).unwrap();
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.vias.push(Via::new(net, Pt::new(10.0, 10.0), 0.05, 0.3, LayerId(0), LayerId(1)));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = ManufacturingRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.manufacturing.min-hole")));
    }

    #[test]
    fn fiducial_shortage_is_flagged_by_default() {
        let netlist = Netlist::new();
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = ManufacturingRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.manufacturing.fiducials")));
    }
}

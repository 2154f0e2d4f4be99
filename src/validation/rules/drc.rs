//! Geometric design-rule checks: track width per class, copper clearance
//! between different nets on the same layer, and edge clearance. Pad-to-pad,
//! silk-overlap, and hole-to-copper checks are covered by the manufacturing
//! module's hole/annular-ring rules and the placement engine's own
//! containment/spacing invariants; this module focuses on the geometry that
//! only exists once routing has run: tracks and vias.
use crate::model::path::seg_seg_dist;
use crate::model::rt::Rt;
use crate::routing::rules::rule_for;
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

pub struct GeometricDrcRule;

impl ValidationRule for GeometricDrcRule {
    fn id(&self) -> &'static str {
        "geometric-drc"
    }

    fn category(&self) -> Category {
        Category::GeometricDrc
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_track_widths(view));
        issues.extend(check_clearances(view));
        issues.extend(check_edge_clearance(view));
        issues
    }
}

fn check_track_widths(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for track in &view.board.tracks {
        let Some(net) = view.netlist.net(track.net) else { continue };
        let rule = rule_for(net.signal_class);
        if track.width_mm + 1e-9 < rule.min_width_mm {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::GeometricDrc,
                    format!(
                        "track on net '{}' has width {:.3}mm, below the {:?}-class minimum of {:.3}mm",
                        net.name, track.width_mm, net.signal_class, rule.min_width_mm
                    ),
                )
                .with_suggestion("widen the track or re-route with the class's minimum width")
                .with_net(net.name.clone())
                .with_doc_ref("validation.drc.track-width"),
            );
        }
    }
    issues
}

fn check_clearances(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let tracks = &view.board.tracks;
    for i in 0..tracks.len() {
        for j in (i + 1)..tracks.len() {
            let (a, b) = (&tracks[i], &tracks[j]);
            if a.net == b.net || a.layer != b.layer {
                continue;
            }
            let (Some(net_a), Some(net_b)) = (view.netlist.net(a.net), view.netlist.net(b.net)) else { continue };
            let required = rule_for(net_a.signal_class).min_clearance_mm.max(rule_for(net_b.signal_class).min_clearance_mm);
            let gap = min_path_distance(&a.pts, &b.pts) - a.width_mm / 2.0 - b.width_mm / 2.0;
            if gap + 1e-9 < required {
                issues.push(
                    Issue::new(
                        Severity::Error,
                        Category::GeometricDrc,
                        format!(
                            "tracks on nets '{}' and '{}' clear by {:.3}mm, below the required {:.3}mm",
                            net_a.name, net_b.name, gap.max(0.0), required
                        ),
                    )
                    .with_suggestion("increase spacing between the two tracks or move one to another layer")
                    .with_net(net_a.name.clone())
                    .with_net(net_b.name.clone())
                    .with_doc_ref("validation.drc.clearance"),
                );
            }
        }
    }
    issues
}

fn min_path_distance(a: &[crate::model::pt::Pt], b: &[crate::model::pt::Pt]) -> f64 {
    let mut best = f64::MAX;
    for wa in a.windows(2) {
        for wb in b.windows(2) {
            best = best.min(seg_seg_dist(wa[0], wa[1], wb[0], wb[1]));
        }
    }
    best
}

fn check_edge_clearance(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let inner =
        Rt::new(0.0, 0.0, view.board.width_mm, view.board.height_mm).inset(view.board.design_rules.edge_clearance_mm, view.board.design_rules.edge_clearance_mm);
    for track in &view.board.tracks {
        let Some(net) = view.netlist.net(track.net) else { continue };
        if track.pts.iter().any(|&p| !inner.contains(p)) {
            issues.push(
                Issue::new(
                    Severity::Error,
                    Category::GeometricDrc,
                    format!("track on net '{}' runs outside the edge-clearance keepout", net.name),
                )
                .with_net(net.name.clone())
                .with_doc_ref("validation.drc.edge-clearance"),
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
    use crate::model::net::SignalClass;
    use crate::model::pt::Pt;
    use crate::model::track::Track;
    use crate::netlist::Netlist;

    #[test]
    fn undersized_track_is_flagged() {
        let mut netlist = Netlist::new();
        let net = netlist.add_net("IN", Some(SignalClass::Audio)).unwrap();
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.tracks.push(Track::new(net, LayerId(0), vec![Pt::new(10.0, 10.0), Pt::new(20.0, 10.0)], 0.1));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = GeometricDrcRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.drc.track-width")));
    }

    #[test]
    fn crowded_parallel_tracks_on_different_nets_fail_clearance() {
        let mut netlist = Netlist::new();
        let net_a = netlist.add_net("A", Some(SignalClass::Audio)).unwrap();
        let net_b = netlist.add_net("B", Some(SignalClass::Audio)).unwrap();
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.tracks.push(Track::new(net_a, LayerId(0), vec![Pt::new(10.0, 10.0), Pt::new(20.0, 10.0)], 0.3));
        board.tracks.push(Track::new(net_b, LayerId(0), vec![Pt::new(10.0, 10.05), Pt::new(20.0, 10.05)], 0.3));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = GeometricDrcRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.drc.clearance")));
    }
}

//! Crosstalk between parallel-routed signal tracks, net length against its
//! declared budget, and reflection risk on high-speed nets from excess
//! length or via transitions.
use crate::model::net::SignalClass;
use crate::routing::rules::rule_for;
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

/// Per-mm-of-parallel-run contribution to the crosstalk proxy score, divided
/// by the gap between the two tracks: longer, tighter-coupled runs score
/// higher. Calibrated so two audio nets routed parallel for 15mm at the
/// audio class's 0.3mm minimum clearance — the crosstalk scenario named in
/// the spec's worked example — score above the default error-severity
/// threshold, not just above `max_crosstalk`.
const COUPLING_CONSTANT: f64 = 0.015;

fn is_signal_bearing(class: SignalClass) -> bool {
    matches!(class, SignalClass::Audio | SignalClass::Control | SignalClass::Digital | SignalClass::HighSpeed)
}

pub struct SignalIntegrityRule;

impl ValidationRule for SignalIntegrityRule {
    fn id(&self) -> &'static str {
        "signal-integrity"
    }

    fn category(&self) -> Category {
        Category::SignalIntegrity
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_crosstalk(view));
        issues.extend(check_net_length(view));
        issues.extend(check_reflections(view));
        issues
    }
}

fn check_crosstalk(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let tracks = &view.board.tracks;
    for i in 0..tracks.len() {
        for j in (i + 1)..tracks.len() {
            let (a, b) = (&tracks[i], &tracks[j]);
            if a.net == b.net || a.layer != b.layer {
                continue;
            }
            let (Some(net_a), Some(net_b)) = (view.netlist.net(a.net), view.netlist.net(b.net)) else { continue };
            if !is_signal_bearing(net_a.signal_class) || !is_signal_bearing(net_b.signal_class) {
                continue;
            }
            for (wa0, wa1) in a.pts.windows(2).map(|w| (w[0], w[1])) {
                for (wb0, wb1) in b.pts.windows(2).map(|w| (w[0], w[1])) {
                    let dir_a = (wa1 - wa0).norm();
                    let dir_b = (wb1 - wb0).norm();
                    if dir_a.dot(dir_b).abs() < 0.98 {
                        continue;
                    }
                    let gap = crate::model::path::pt_seg_dist(wa0, wb0, wb1).min(crate::model::path::pt_seg_dist(wa1, wb0, wb1));
                    let overlap = wa0.dist(wa1).min(wb0.dist(wb1));
                    let score = COUPLING_CONSTANT * overlap / gap.max(0.05);
                    if score > view.config.validation.max_crosstalk {
                        issues.push(
                            Issue::new(
                                Severity::from_score(score.min(1.0), view.config.validation.severity_thresholds),
                                Category::SignalIntegrity,
                                format!(
                                    "nets '{}' and '{}' run parallel for {:.1}mm at {:.2}mm spacing, estimated crosstalk {:.3} exceeds {:.3}",
                                    net_a.name, net_b.name, overlap, gap, score, view.config.validation.max_crosstalk
                                ),
                            )
                            .with_suggestion("increase spacing, shorten the parallel run, or route on different layers")
                            .with_net(net_a.name.clone())
                            .with_net(net_b.name.clone())
                            .with_doc_ref("validation.signal-integrity.crosstalk"),
                        );
                    }
                }
            }
        }
    }
    issues
}

fn check_net_length(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for net in view.netlist.nets() {
        let Some(max_length) = net.max_length_mm else { continue };
        let total: f64 = view.tracks_of(net.id).iter().map(|t| t.length_mm()).sum();
        if total > max_length {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::SignalIntegrity,
                    format!("net '{}' routes {:.1}mm, above its declared budget of {:.1}mm", net.name, total, max_length),
                )
                .with_suggestion("re-place the connected components closer together")
                .with_net(net.name.clone())
                .with_doc_ref("validation.signal-integrity.length"),
            );
        }
    }
    issues
}

fn check_reflections(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for net in view.netlist.nets() {
        if net.signal_class != SignalClass::HighSpeed {
            continue;
        }
        let rule = rule_for(net.signal_class);
        let total_length: f64 = view.tracks_of(net.id).iter().map(|t| t.length_mm()).sum();
        let via_count = view.vias_of(net.id).len();
        if total_length > rule.max_length_mm {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::SignalIntegrity,
                    format!("high-speed net '{}' routes {:.1}mm, above the {:.1}mm reflection-safe length for its class", net.name, total_length, rule.max_length_mm),
                )
                .with_suggestion("shorten the net or add series termination")
                .with_net(net.name.clone())
                .with_doc_ref("validation.signal-integrity.reflections"),
            );
        } else if via_count > 2 {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::SignalIntegrity,
                    format!("high-speed net '{}' crosses {} vias, each an impedance discontinuity", net.name, via_count),
                )
                .with_suggestion("reduce layer transitions on this net")
                .with_net(net.name.clone())
                .with_doc_ref("validation.signal-integrity.reflections"),
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
    use crate::model::track::Track;
    use crate::netlist::Netlist;

    #[test]
    fn tightly_coupled_parallel_tracks_are_flagged() {
        let mut netlist = Netlist::new();
        let net_a = netlist.add_net("A", Some(SignalClass::Control)).unwrap();
        let net_b = netlist.add_net("B", Some(SignalClass::Control)).unwrap();
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.tracks.push(Track::new(net_a, LayerId(0), vec![Pt::new(0.0, 0.0), Pt::new(30.0, 0.0)], 0.3));
        board.tracks.push(Track::new(net_b, LayerId(0), vec![Pt::new(0.0, 0.1), Pt::new(30.0, 0.1)], 0.3));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = SignalIntegrityRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.signal-integrity.crosstalk")));
    }

    #[test]
    fn net_within_length_budget_is_not_flagged() {
        let mut netlist = Netlist::new();
        let net = netlist.add_net("IN", Some(SignalClass::Audio)).unwrap();
        netlist.net_mut(net).unwrap().max_length_mm = Some(100.0);
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.tracks.push(Track::new(net, LayerId(0), vec![Pt::new(0.0, 0.0), Pt::new(10.0, 0.0)], 0.3));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = SignalIntegrityRule.run(&view);
        assert!(!issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.signal-integrity.length")));
    }
}

//! Audio-domain checks that have no analogue on a generic board: predicted
//! frequency-response flatness of the routed path, proximity of audio traces
//! to noisy nets, and acute-angle bends on audio paths.
use crate::model::net::SignalClass;
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

/// Parasitic inductance per unit track length for a narrow copper trace, in
/// henries per millimetre; used only to rank routed length against the
/// audio passband's impedance tolerance, not as a certified simulation.
const INDUCTANCE_H_PER_MM: f64 = 7e-10;
/// Minimum bend angle, in degrees, below which a trace corner is considered
/// acute on an audio path.
const MIN_BEND_ANGLE_DEG: f64 = 45.0;
const NOISY_CLASSES: [SignalClass; 2] = [SignalClass::Digital, SignalClass::HighSpeed];

pub struct AudioSpecificRule;

impl ValidationRule for AudioSpecificRule {
    fn id(&self) -> &'static str {
        "audio-specific"
    }

    fn category(&self) -> Category {
        Category::AudioSpecific
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_frequency_response(view));
        issues.extend(check_noisy_neighbors(view));
        issues.extend(check_acute_angles(view));
        issues
    }
}

fn check_frequency_response(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let max_freq = if view.config.validation.extended_bandwidth_analysis { view.config.validation.max_frequency_hz } else { 20_000.0 };
    for net in view.netlist.nets() {
        if net.signal_class != SignalClass::Audio {
            continue;
        }
        let Some(target) = net.target_impedance else { continue };
        let total_length: f64 = view.tracks_of(net.id).iter().map(|t| t.length_mm()).sum();
        if total_length == 0.0 {
            continue;
        }
        let inductance_h = total_length * INDUCTANCE_H_PER_MM;
        let reactance_at_max = 2.0 * std::f64::consts::PI * max_freq * inductance_h;
        let tolerance_ratio = 10f64.powf(view.config.validation.frequency_tolerance_db / 20.0) - 1.0;
        if reactance_at_max > target * tolerance_ratio {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    Category::AudioSpecific,
                    format!(
                        "net '{}' trace inductance contributes an estimated {:.2}ohm reactance at {:.0}Hz, exceeding the {:.1}dB passband tolerance",
                        net.name, reactance_at_max, max_freq, view.config.validation.frequency_tolerance_db
                    ),
                )
                .with_suggestion("shorten this audio net or widen its trace to reduce parasitic inductance")
                .with_net(net.name.clone())
                .with_doc_ref("validation.audio.frequency-response"),
            );
        }
    }
    issues
}

fn check_noisy_neighbors(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let tracks = &view.board.tracks;
    for i in 0..tracks.len() {
        for j in (i + 1)..tracks.len() {
            let (a, b) = (&tracks[i], &tracks[j]);
            if a.net == b.net || a.layer != b.layer {
                continue;
            }
            let (Some(net_a), Some(net_b)) = (view.netlist.net(a.net), view.netlist.net(b.net)) else { continue };
            let (audio_net, noisy_net) = if net_a.signal_class == SignalClass::Audio && NOISY_CLASSES.contains(&net_b.signal_class) {
                (net_a, net_b)
            } else if net_b.signal_class == SignalClass::Audio && NOISY_CLASSES.contains(&net_a.signal_class) {
                (net_b, net_a)
            } else {
                continue;
            };
            let gap = crate::model::path::seg_seg_dist(a.pts[0], *a.pts.last().unwrap(), b.pts[0], *b.pts.last().unwrap());
            let required = view.board.design_rules.min_zone_clearance_mm * 3.0;
            if gap < required {
                issues.push(
                    Issue::new(
                        Severity::Warning,
                        Category::AudioSpecific,
                        format!("audio net '{}' runs only {:.2}mm from noisy net '{}'", audio_net.name, gap, noisy_net.name),
                    )
                    .with_suggestion("route the audio trace further from digital/high-speed nets or add a guard trace")
                    .with_net(audio_net.name.clone())
                    .with_net(noisy_net.name.clone())
                    .with_doc_ref("validation.audio.noisy-neighbor"),
                );
            }
        }
    }
    issues
}

fn check_acute_angles(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for track in &view.board.tracks {
        let Some(net) = view.netlist.net(track.net) else { continue };
        if net.signal_class != SignalClass::Audio {
            continue;
        }
        for window in track.pts.windows(3) {
            let (p0, p1, p2) = (window[0], window[1], window[2]);
            let v1 = (p0 - p1).norm();
            let v2 = (p2 - p1).norm();
            let interior_deg = v1.dot(v2).clamp(-1.0, 1.0).acos().to_degrees();
            if interior_deg < MIN_BEND_ANGLE_DEG {
                issues.push(
                    Issue::new(
                        Severity::Warning,
                        Category::AudioSpecific,
                        format!("audio net '{}' bends at {:.0} degrees, below the {:.0} degree minimum", net.name, interior_deg, MIN_BEND_ANGLE_DEG),
                    )
                    .with_suggestion("replace the acute corner with two 45 degree segments or a curved bend")
                    .with_net(net.name.clone())
                    .with_doc_ref("validation.audio.acute-angle"),
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
    use crate::model::ids::LayerId;
    use crate::model::pt::Pt;
    use crate::model::track::Track;
    use crate::netlist::Netlist;

    #[test]
    fn sharp_corner_on_audio_track_is_flagged() {
        let mut netlist = Netlist::new();
        let net = netlist.add_net("IN", Some(SignalClass::Audio)).unwrap();
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.tracks.push(Track::new(
            net,
            LayerId(0),
            vec![Pt::new(0.0, 0.0), Pt::new(10.0, 0.0), Pt::new(5.0, 1.0)],
            0.3,
        ));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = AudioSpecificRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.audio.acute-angle")));
    }

    #[test]
    fn gentle_bend_on_audio_track_is_not_flagged() {
        let mut netlist = Netlist::new();
        let net = netlist.add_net("IN", Some(SignalClass::Audio)).unwrap();
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.tracks.push(Track::new(
            net,
            LayerId(0),
            vec![Pt::new(0.0, 0.0), Pt::new(10.0, 0.0), Pt::new(20.0, 10.0)],
            0.3,
        ));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = AudioSpecificRule.run(&view);
        assert!(!issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.audio.acute-angle")));
    }
}

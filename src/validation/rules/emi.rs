//! Electromagnetic interference proxies: missing ground-plane reference
//! under nets that need one, and loop area on fast-edge nets (digital,
//! high-speed) that radiate.
use crate::model::net::SignalClass;
use crate::model::rt::Rt;
use crate::routing::rules::rule_for;
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

fn radiating_class(class: SignalClass) -> bool {
    matches!(class, SignalClass::Digital | SignalClass::HighSpeed)
}

pub struct EmiRule;

impl ValidationRule for EmiRule {
    fn id(&self) -> &'static str {
        "emi"
    }

    fn category(&self) -> Category {
        Category::Emi
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(check_gnd_plane_reference(view));
        issues.extend(check_radiating_loop_area(view));
        issues
    }
}

fn check_gnd_plane_reference(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    let has_ground_zone = view.board.zones.iter().any(|z| view.netlist.net(z.net).map(|n| n.signal_class) == Some(SignalClass::Ground));
    for net in view.netlist.nets() {
        if view.tracks_of(net.id).is_empty() {
            continue;
        }
        if !rule_for(net.signal_class).needs_gnd_plane || has_ground_zone {
            continue;
        }
        issues.push(
            Issue::new(
                Severity::Warning,
                Category::Emi,
                format!("net '{}' needs a ground-plane reference but the board has no ground zone", net.name),
            )
            .with_suggestion("synthesize a ground pour before finalizing this board")
            .with_net(net.name.clone())
            .with_doc_ref("validation.emi.ground-reference"),
        );
    }
    issues
}

fn check_radiating_loop_area(view: &BoardView) -> Vec<Issue> {
    let mut issues = Vec::new();
    for net in view.netlist.nets() {
        if !radiating_class(net.signal_class) {
            continue;
        }
        let mut bounds = Rt::empty();
        for track in view.tracks_of(net.id) {
            bounds = bounds.united(&track.path().bounds());
        }
        if bounds.is_empty() {
            continue;
        }
        let proxy = bounds.area() / view.config.validation.max_emissions_proxy.max(1e-6) / 1000.0;
        if proxy > view.config.validation.max_emissions_proxy {
            issues.push(
                Issue::new(
                    Severity::from_score(proxy.min(1.0), view.config.validation.severity_thresholds),
                    Category::Emi,
                    format!("net '{}' spans a {:.0}mm^2 loop, estimated emissions proxy {:.2} exceeds the {:.2} limit", net.name, bounds.area(), proxy, view.config.validation.max_emissions_proxy),
                )
                .with_suggestion("route this net closer to its return path or tighten its bounding loop")
                .with_net(net.name.clone())
                .with_doc_ref("validation.emi.loop-area"),
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
    fn digital_net_without_ground_zone_is_flagged() {
        let mut netlist = Netlist::new();
        let net = netlist.add_net("CLK", Some(SignalClass::Digital)).unwrap();
        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        board.tracks.push(Track::new(net, LayerId(0), vec![Pt::new(0.0, 0.0), Pt::new(10.0, 0.0)], 0.3));
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let issues = EmiRule.run(&view);
        assert!(issues.iter().any(|i| i.documentation_ref.as_deref() == Some("validation.emi.ground-reference")));
    }
}

//! Every net electrically connects all its endpoints, per §4.6
//! "Connectivity" and the routing-connectivity testable property.
use crate::validation::issue::{Category, Issue, Severity};
use crate::validation::rules::ValidationRule;
use crate::validation::BoardView;

pub struct ConnectivityRule;

impl ValidationRule for ConnectivityRule {
    fn id(&self) -> &'static str {
        "connectivity"
    }

    fn category(&self) -> Category {
        Category::Connectivity
    }

    fn run(&self, view: &BoardView) -> Vec<Issue> {
        let mut issues = Vec::new();
        for net in view.netlist.nets() {
            if net.endpoints.len() < 2 {
                continue;
            }
            if view.unrouted.contains(&net.id) {
                issues.push(
                    Issue::new(Severity::Error, Category::Connectivity, format!("net '{}' could not be routed", net.name))
                        .with_suggestion("increase max_reroute_attempts or widen the search cost budget")
                        .with_net(net.name.clone())
                        .with_doc_ref("validation.connectivity.unrouted"),
                );
                continue;
            }
            if !view.is_connected(net.id) {
                issues.push(
                    Issue::new(
                        Severity::Error,
                        Category::Connectivity,
                        format!("net '{}' has endpoints not joined by its routed tracks", net.name),
                    )
                    .with_suggestion("re-route the net; its endpoints are split across disjoint track segments")
                    .with_net(net.name.clone())
                    .with_doc_ref("validation.connectivity.disconnected"),
                );
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};
    use crate::model::component::Kind;
    use crate::model::net::SignalClass;
    use crate::model::pt::Pt;
    use crate::netlist::Netlist;
    use crate::registry::Registry;

    #[test]
    fn unrouted_net_emits_error_issue() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let r1 = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        let r2 = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        netlist.component_mut(r1).unwrap().position = Some(Pt::new(5.0, 5.0));
        netlist.component_mut(r2).unwrap().position = Some(Pt::new(40.0, 5.0));
        let net_id = netlist.add_net("SIGNAL", Some(SignalClass::Control)).unwrap();
        netlist.connect(net_id, r1, "1").unwrap();
        netlist.connect(net_id, r2, "1").unwrap();

        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let unrouted = vec![net_id];
        let view = BoardView::new(&board, &netlist, &unrouted, &config);
        let issues = ConnectivityRule.run(&view);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }
}

//! The unified validation engine: a fixed-order catalog of rule modules run
//! against a read-only board snapshot, aggregated into one `ValidationReport`
//! and fed back to the pipeline driver for refinement or finalization.
pub mod error;
pub mod issue;
pub mod report;
pub mod rules;

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::config::types::Config;
use crate::model::board::Board;
use crate::model::ids::NetId;
use crate::model::pt::Pt;
use crate::model::track::Track;
use crate::model::via::Via;
use crate::netlist::Netlist;
pub use crate::validation::error::ValidationError;
pub use crate::validation::issue::{Category, Issue, Severity};
pub use crate::validation::report::ValidationReport;
use crate::validation::rules::ValidationRule;

/// A read-only snapshot of a board pass: the frozen board and netlist for
/// this iteration, the set of nets the router could not connect, and the
/// active configuration. Rule modules receive only this — never a mutable
/// `Board` handle — so the engine may fan them out to a worker pool without
/// synchronization.
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub netlist: &'a Netlist,
    pub unrouted: &'a [NetId],
    pub config: &'a Config,
    tracks_by_net: HashMap<NetId, Vec<&'a Track>>,
    vias_by_net: HashMap<NetId, Vec<&'a Via>>,
    connectivity: HashMap<NetId, bool>,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board, netlist: &'a Netlist, unrouted: &'a [NetId], config: &'a Config) -> Self {
        let mut tracks_by_net: HashMap<NetId, Vec<&Track>> = HashMap::new();
        for track in &board.tracks {
            tracks_by_net.entry(track.net).or_default().push(track);
        }
        let mut vias_by_net: HashMap<NetId, Vec<&Via>> = HashMap::new();
        for via in &board.vias {
            vias_by_net.entry(via.net).or_default().push(via);
        }

        let unrouted_set: HashSet<NetId> = unrouted.iter().copied().collect();
        let mut connectivity = HashMap::new();
        for net in netlist.nets() {
            if unrouted_set.contains(&net.id) {
                connectivity.insert(net.id, false);
                continue;
            }
            let endpoints: Vec<Pt> =
                net.endpoints.iter().filter_map(|e| netlist.component(e.component).and_then(|c| c.position)).collect();
            let connected = endpoints.len() < 2
                || net_is_connected(
                    &endpoints,
                    tracks_by_net.get(&net.id).map(Vec::as_slice).unwrap_or(&[]),
                    config.routing.grid_resolution_mm,
                );
            connectivity.insert(net.id, connected);
        }

        Self { board, netlist, unrouted, config, tracks_by_net, vias_by_net, connectivity }
    }

    pub fn tracks_of(&self, net: NetId) -> &[&'a Track] {
        self.tracks_by_net.get(&net).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vias_of(&self, net: NetId) -> &[&'a Via] {
        self.vias_by_net.get(&net).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether every endpoint of `net` is reachable from every other through
    /// this pass's tracks, per the routing-connectivity testable property.
    /// A net with fewer than two endpoints is trivially connected.
    pub fn is_connected(&self, net: NetId) -> bool {
        self.connectivity.get(&net).copied().unwrap_or(false)
    }
}

/// Union-find over grid-snapped track points, checking that every endpoint
/// lands in the same component. Snapping absorbs the floor-based quantization
/// the router's grid model applies to endpoint positions.
fn net_is_connected(endpoints: &[Pt], tracks: &[&Track], resolution_mm: f64) -> bool {
    let res = resolution_mm.max(1e-6);
    let snap = |p: Pt| -> (i64, i64) { ((p.x / res).round() as i64, (p.y / res).round() as i64) };

    let mut parent: HashMap<(i64, i64), (i64, i64)> = HashMap::new();
    fn find(parent: &mut HashMap<(i64, i64), (i64, i64)>, x: (i64, i64)) -> (i64, i64) {
        let p = *parent.entry(x).or_insert(x);
        if p == x {
            x
        } else {
            let r = find(parent, p);
            parent.insert(x, r);
            r
        }
    }
    let mut union = |parent: &mut HashMap<(i64, i64), (i64, i64)>, a, b| {
        let ra = find(parent, a);
        let rb = find(parent, b);
        if ra != rb {
            parent.insert(ra, rb);
        }
    };

    for track in tracks {
        let snapped: Vec<(i64, i64)> = track.pts.iter().map(|&p| snap(p)).collect();
        for w in snapped.windows(2) {
            union(&mut parent, w[0], w[1]);
        }
    }

    let roots: HashSet<(i64, i64)> = endpoints.iter().map(|&p| find(&mut parent, snap(p))).collect();
    roots.len() <= 1
}

/// Runs the full rule catalog against `view`, fanning modules out to a
/// worker pool (each is a pure function of the frozen snapshot) and merging
/// results back in the catalog's fixed declared order, so parallel dispatch
/// cannot perturb the deterministic report.
pub struct ValidationEngine {
    catalog: Vec<Box<dyn ValidationRule>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self { catalog: rules::default_catalog() }
    }
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an engine from an explicit catalog, e.g. for tests that want
    /// to exercise a single rule module in isolation.
    pub fn with_catalog(catalog: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { catalog }
    }

    pub fn run(&self, view: &BoardView, timestamp: u64) -> ValidationReport {
        let per_rule: Vec<Vec<Issue>> = self.catalog.par_iter().map(|rule| rule.run(view)).collect();
        let issues: Vec<Issue> = per_rule.into_iter().flatten().collect();
        ValidationReport::new(issues, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};
    use crate::model::component::Kind;
    use crate::model::net::SignalClass;
    use crate::registry::Registry;
    use crate::routing::router::Router;

    #[test]
    fn connected_net_is_reported_connected() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let r1 = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        let r2 = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        netlist.component_mut(r1).unwrap().position = Some(Pt::new(5.0, 5.0));
        netlist.component_mut(r2).unwrap().position = Some(Pt::new(40.0, 5.0));
        let net_id = netlist.add_net("SIGNAL", Some(SignalClass::Control)).unwrap();
        netlist.connect(net_id, r1, "1").unwrap();
        netlist.connect(net_id, r2, "1").unwrap();

        let mut board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let config = Config::default();
        let routed = Router::new(&config.routing).route(&netlist, &board);
        board.tracks = routed.tracks;
        board.vias = routed.vias;

        let view = BoardView::new(&board, &netlist, &[], &config);
        assert!(view.is_connected(net_id));
    }

    #[test]
    fn engine_aggregates_issues_in_catalog_order() {
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let netlist = Netlist::new();
        let config = Config::default();
        let view = BoardView::new(&board, &netlist, &[], &config);
        let engine = ValidationEngine::new();
        let report = engine.run(&view, 0);
        assert!(report.is_valid);
    }
}

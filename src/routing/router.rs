use std::cmp::Reverse;

use crate::config::types::RoutingConfig;
use crate::model::board::Board;
use crate::model::ids::{LayerId, NetId};
use crate::model::net::{Net, SignalClass};
use crate::model::pt::Pt;
use crate::model::track::Track;
use crate::model::via::Via;
use crate::netlist::Netlist;
use crate::routing::error::RoutingError;
use crate::routing::grid::{BlockMap, GridModel, State};
use crate::routing::pathfind::{astar, PathfindParams};
use crate::routing::rules::rule_for;

/// Cost added on top of the general non-preferred-layer penalty for routing
/// on a layer the active net's class rule names in `avoid_layers` (e.g.
/// audio steering away from `back`), so an explicitly avoided layer costs
/// more than simply not being the preferred one.
const AVOID_LAYER_PENALTY: f64 = 8.0;

/// Tracks and vias produced by a routing pass, plus any nets the search
/// could not connect within the attempt budget.
#[derive(Debug, Default, Clone)]
pub struct RouteResult {
    pub tracks: Vec<Track>,
    pub vias: Vec<Via>,
    pub failed: Vec<RoutingError>,
}

/// Routes every net on a placed board. Endpoint positions are approximated
/// by the owning component's placed center: this model does not carry
/// per-pad offsets within a footprint, so finer endpoint geometry is out of
/// scope for this routing pass.
pub struct Router<'a> {
    config: &'a RoutingConfig,
}

impl<'a> Router<'a> {
    pub fn new(config: &'a RoutingConfig) -> Self {
        Self { config }
    }

    pub fn route(&self, netlist: &Netlist, board: &Board) -> RouteResult {
        let grid = GridModel::new(board, self.config.grid_resolution_mm);
        let mut blk = BlockMap::new();
        grid.mark_components(&mut blk, netlist, 0.3);

        let mut order: Vec<NetId> = netlist.nets().iter().map(|n| n.id).collect();
        order.sort_by_key(|&id| {
            let net = netlist.net(id).unwrap();
            let span = net_span_mm(net, netlist);
            (net.signal_class.routing_priority(), Reverse(OrderedMm(span)))
        });

        let mut result = RouteResult::default();
        let mut routed_cells: Vec<(NetId, u8, Vec<State>)> = Vec::new();

        for &net_id in &order {
            let net = netlist.net(net_id).unwrap();
            if net.endpoints.len() < 2 {
                continue;
            }
            match self.route_one(&grid, &mut blk, netlist, net, board) {
                Some((tracks, vias, cells)) => {
                    for s in &cells {
                        grid.mark_track(&mut blk, s.layer, &[s.p], 1);
                    }
                    routed_cells.push((net_id, net.signal_class.routing_priority(), cells));
                    result.tracks.extend(tracks);
                    result.vias.extend(vias);
                }
                None => {
                    if !self.retry_with_ripup(&grid, &mut blk, netlist, net, board, &mut routed_cells, &mut result) {
                        log::warn!("net {net_id} could not be routed within the search budget");
                        result.failed.push(RoutingError::RoutingInfeasible { net_id });
                    }
                }
            }
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn retry_with_ripup(
        &self,
        grid: &GridModel,
        blk: &mut BlockMap,
        netlist: &Netlist,
        net: &Net,
        board: &Board,
        routed_cells: &mut Vec<(NetId, u8, Vec<State>)>,
        result: &mut RouteResult,
    ) -> bool {
        routed_cells.sort_by_key(|(_, priority, _)| Reverse(*priority));
        let window: Vec<usize> = (0..routed_cells.len().min(self.config.max_reroute_attempts as usize)).collect();

        let mut ripped = Vec::new();
        for &idx in window.iter().rev() {
            let (net_id, _, cells) = routed_cells.remove(idx);
            for s in &cells {
                grid.mark_track(blk, s.layer, &[s.p], -1);
            }
            ripped.push(net_id);
        }

        if let Some((tracks, vias, cells)) = self.route_one(grid, blk, netlist, net, board) {
            for s in &cells {
                grid.mark_track(blk, s.layer, &[s.p], 1);
            }
            routed_cells.push((net.id, net.signal_class.routing_priority(), cells));
            result.tracks.extend(tracks);
            result.vias.extend(vias);

            for net_id in ripped {
                let ripped_net = netlist.net(net_id).unwrap();
                if let Some((tracks, vias, cells)) = self.route_one(grid, blk, netlist, ripped_net, board) {
                    for s in &cells {
                        grid.mark_track(blk, s.layer, &[s.p], 1);
                    }
                    routed_cells.push((net_id, ripped_net.signal_class.routing_priority(), cells));
                    result.tracks.extend(tracks);
                    result.vias.extend(vias);
                } else {
                    result.failed.push(RoutingError::RoutingInfeasible { net_id });
                }
            }
            true
        } else {
            for net_id in ripped {
                let ripped_net = netlist.net(net_id).unwrap();
                if let Some((tracks, vias, cells)) = self.route_one(grid, blk, netlist, ripped_net, board) {
                    for s in &cells {
                        grid.mark_track(blk, s.layer, &[s.p], 1);
                    }
                    routed_cells.push((net_id, ripped_net.signal_class.routing_priority(), cells));
                    result.tracks.extend(tracks);
                    result.vias.extend(vias);
                }
            }
            false
        }
    }

    fn route_one(
        &self,
        grid: &GridModel,
        blk: &BlockMap,
        netlist: &Netlist,
        net: &Net,
        board: &Board,
    ) -> Option<(Vec<Track>, Vec<Via>, Vec<State>)> {
        let rule = rule_for(net.signal_class);
        let preferred_layer = board.layer_named(rule.preferred_layer).map(|l| l.id);
        let avoid_layers: Vec<LayerId> = rule.avoid_layers.iter().filter_map(|&name| board.layer_named(name).map(|l| l.id)).collect();
        let params = PathfindParams {
            via_preference: self.config.via_preference,
            preferred_layer,
            non_preferred_layer_penalty: 2.0,
            avoid_layers,
            avoid_layer_penalty: AVOID_LAYER_PENALTY,
        };

        let endpoint_pts: Vec<Pt> = net
            .endpoints
            .iter()
            .filter_map(|e| netlist.component(e.component).and_then(|c| c.position))
            .collect();
        if endpoint_pts.len() < 2 {
            return None;
        }

        let mst_edges = minimum_spanning_tree(&endpoint_pts);
        let start_layer = preferred_layer.unwrap_or(board.layers[0].id);

        let mut tracks = Vec::new();
        let mut vias = Vec::new();
        let mut all_cells = Vec::new();

        for (a, b) in mst_edges {
            let start = State { p: grid.grid_pt(endpoint_pts[a]), layer: start_layer };
            let goal = State { p: grid.grid_pt(endpoint_pts[b]), layer: start_layer };
            let path = astar(grid, blk, &params, start, &[goal], 20_000)?;
            let (segment_tracks, segment_vias) = path_to_tracks_and_vias(grid, net.id, rule.min_width_mm, self.config.via_diameter_mm, self.config.via_drill_mm, &path);
            all_cells.extend(path);
            tracks.extend(segment_tracks);
            vias.extend(segment_vias);
        }

        Some((tracks, vias, all_cells))
    }
}

fn net_span_mm(net: &Net, netlist: &Netlist) -> f64 {
    let pts: Vec<Pt> = net.endpoints.iter().filter_map(|e| netlist.component(e.component).and_then(|c| c.position)).collect();
    let mut max = 0.0_f64;
    for i in 0..pts.len() {
        for j in (i + 1)..pts.len() {
            let d = (pts[i].x - pts[j].x).abs() + (pts[i].y - pts[j].y).abs();
            max = max.max(d);
        }
    }
    max
}

/// A minimal wrapper making `f64` totally ordered for sort keys; routing
/// cost comparisons never involve NaN.
#[derive(Debug, Copy, Clone, PartialEq)]
struct OrderedMm(f64);
impl Eq for OrderedMm {}
impl PartialOrd for OrderedMm {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for OrderedMm {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Prim's algorithm over Euclidean distance, returning MST edges as index
/// pairs into `pts` in deterministic discovery order.
fn minimum_spanning_tree(pts: &[Pt]) -> Vec<(usize, usize)> {
    let n = pts.len();
    let mut in_tree = vec![false; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    in_tree[0] = true;
    for _ in 1..n {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if !in_tree[i] {
                continue;
            }
            for j in 0..n {
                if in_tree[j] {
                    continue;
                }
                let d = pts[i].dist(pts[j]);
                if best.map(|(_, _, bd)| d < bd).unwrap_or(true) {
                    best = Some((i, j, d));
                }
            }
        }
        if let Some((i, j, _)) = best {
            in_tree[j] = true;
            edges.push((i, j));
        }
    }
    edges
}

fn path_to_tracks_and_vias(
    grid: &GridModel,
    net_id: NetId,
    width_mm: f64,
    via_diameter_mm: f64,
    via_drill_mm: f64,
    path: &[State],
) -> (Vec<Track>, Vec<Via>) {
    let mut tracks = Vec::new();
    let mut vias = Vec::new();
    let mut segment: Vec<Pt> = Vec::new();
    let mut segment_layer: Option<LayerId> = None;

    for state in path {
        match segment_layer {
            Some(layer) if layer == state.layer => {
                segment.push(grid.world_pt(state.p));
            }
            Some(layer) => {
                segment.push(grid.world_pt(state.p));
                tracks.push(Track::new(net_id, layer, std::mem::take(&mut segment), width_mm));
                let p = grid.world_pt(state.p);
                vias.push(Via::new(net_id, p, via_drill_mm, via_diameter_mm, layer, state.layer));
                segment.push(p);
                segment_layer = Some(state.layer);
            }
            None => {
                segment.push(grid.world_pt(state.p));
                segment_layer = Some(state.layer);
            }
        }
    }
    if let Some(layer) = segment_layer {
        if segment.len() > 1 {
            tracks.push(Track::new(net_id, layer, segment, width_mm));
        }
    }
    (tracks, vias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RoutingConfig;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};
    use crate::model::component::Kind;
    use crate::model::net::SignalClass;
    use crate::netlist::Netlist;
    use crate::registry::Registry;

    #[test]
    fn routes_a_two_pin_net_between_placed_components() {
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
        let config = RoutingConfig::default();
        let router = Router::new(&config);
        let result = router.route(&netlist, &board);
        assert!(result.failed.is_empty());
        assert!(!result.tracks.is_empty());
    }
}

//! Copper-pour synthesis: fills a free region on a plane-carrying net's
//! layer, clear of foreign-net copper and component footprints, with a
//! thermal-relief policy for that net's own pads.
pub mod error;
pub mod thermal;

use crate::config::types::ZoneConfig;
use crate::model::board::{Board, LayerRole};
use crate::model::net::SignalClass;
use crate::model::polygon::Polygon;
use crate::model::pt::PtI;
use crate::model::rt::Rt;
use crate::model::zone::Zone;
use crate::netlist::Netlist;
use crate::routing::grid::{BlockMap, GridModel, State};
use crate::routing::router::RouteResult;
use error::ZoneSynthError;

/// Synthesizes one pour per plane-carrying net, reusing the routing grid's
/// resolution and `BlockMap` rather than a dedicated polygon-boolean engine:
/// the free region is found directly on that grid, instead of computing a
/// second spatial index for the same board.
pub struct ZoneSynth<'a> {
    config: &'a ZoneConfig,
    resolution_mm: f64,
}

impl<'a> ZoneSynth<'a> {
    pub fn new(config: &'a ZoneConfig, resolution_mm: f64) -> Self {
        Self { config, resolution_mm }
    }

    pub fn synthesize(
        &self,
        netlist: &Netlist,
        board: &Board,
        routed: &RouteResult,
        edge_clearance_mm: f64,
        zone_clearance_mm: f64,
    ) -> Result<Vec<Zone>, ZoneSynthError> {
        let grid = GridModel::new(board, self.resolution_mm);
        let mut zones = Vec::new();

        for net in netlist.nets() {
            let Some(layer) = plane_layer_for(board, net.signal_class) else { continue };

            let mut blk = BlockMap::new();
            mark_foreign_clearance(&grid, &mut blk, routed, net.id, layer, zone_clearance_mm);
            mark_component_keepouts(&grid, &mut blk, netlist, layer, zone_clearance_mm);

            let board_rect = Rt::new(0.0, 0.0, board.width_mm, board.height_mm).inset(edge_clearance_mm, edge_clearance_mm);
            let free_rect = largest_free_rect(&grid, &blk, layer, board_rect)
                .ok_or(ZoneSynthError::NoFreeRegion { net_id: net.id })?;

            let mut zone = Zone::new(net.id, layer, Polygon::rect(free_rect), zone_clearance_mm);
            zone.thermal_relief = thermal::relief_policy_for(net, self.config);
            zones.push(zone);
        }
        Ok(zones)
    }
}

/// Ground pours to the innermost ground-role layer (or the back layer on a
/// 2-layer board); power pours to the innermost power-role layer. Other
/// classes never carry a plane.
fn plane_layer_for(board: &Board, class: SignalClass) -> Option<crate::model::ids::LayerId> {
    let role = match class {
        SignalClass::Ground => LayerRole::Ground,
        SignalClass::Power => LayerRole::Power,
        _ => return None,
    };
    board
        .layers
        .iter()
        .find(|l| l.role == role)
        .or_else(|| if class == SignalClass::Ground { board.layers.last() } else { None })
        .map(|l| l.id)
}

fn mark_foreign_clearance(
    grid: &GridModel,
    blk: &mut BlockMap,
    routed: &RouteResult,
    own_net: crate::model::ids::NetId,
    layer: crate::model::ids::LayerId,
    clearance_mm: f64,
) {
    let halo_cells = (clearance_mm / grid.resolution_mm).ceil() as i64;
    for track in &routed.tracks {
        if track.net == own_net || track.layer != layer {
            continue;
        }
        for &p in &track.pts {
            mark_halo(blk, layer, grid.grid_pt(p), halo_cells);
        }
    }
    for via in &routed.vias {
        if via.net == own_net || !via.connects(layer) {
            continue;
        }
        mark_halo(blk, layer, grid.grid_pt(via.p), halo_cells);
    }
}

fn mark_component_keepouts(grid: &GridModel, blk: &mut BlockMap, netlist: &Netlist, layer: crate::model::ids::LayerId, clearance_mm: f64) {
    let mut single_layer_blk = BlockMap::new();
    grid.mark_components(&mut single_layer_blk, netlist, clearance_mm);
    for (state, count) in single_layer_blk {
        if state.layer == layer && count > 0 {
            blk.insert(state, count);
        }
    }
}

fn mark_halo(blk: &mut BlockMap, layer: crate::model::ids::LayerId, center: PtI, radius_cells: i64) {
    for dx in -radius_cells..=radius_cells {
        for dy in -radius_cells..=radius_cells {
            let p = PtI::new(center.x + dx, center.y + dy);
            *blk.entry(State { p, layer }).or_insert(0) += 1;
        }
    }
}

/// Largest axis-aligned free rectangle within `bounds` on `layer`, found by
/// the standard maximal-rectangle-in-binary-matrix sweep over grid rows.
/// This approximates the spec's full polygon subtraction (board outline
/// minus halos minus keepouts) with its largest inscribed rectangle rather
/// than a multiply-connected polygon — adequate for a single contiguous
/// pour and far simpler than a rectilinear-polygon-with-holes engine.
fn largest_free_rect(grid: &GridModel, blk: &BlockMap, layer: crate::model::ids::LayerId, bounds: Rt) -> Option<Rt> {
    let lo = grid.grid_pt(bounds.bl());
    let hi = grid.grid_pt(bounds.tr());
    if hi.x <= lo.x || hi.y <= lo.y {
        return None;
    }
    let width = (hi.x - lo.x) as usize;
    let height = (hi.y - lo.y) as usize;
    let mut heights = vec![0i64; width];
    let mut best: Option<(Rt, f64)> = None;

    for row in 0..height {
        let y = lo.y + row as i64;
        for col in 0..width {
            let x = lo.x + col as i64;
            let free = !grid.is_blocked(blk, &State { p: PtI::new(x, y), layer });
            heights[col] = if free { heights[col] + 1 } else { 0 };
        }
        if let Some((rect, area)) = max_rect_in_histogram(&heights, lo.x, y, grid.resolution_mm) {
            if best.as_ref().map(|(_, best_area)| area > *best_area).unwrap_or(true) {
                best = Some((rect, area));
            }
        }
    }
    best.map(|(rect, _)| rect)
}

/// Classic "largest rectangle in histogram" via a monotonic stack, adapted
/// to emit the rectangle's world-space bounds rather than just its area.
fn max_rect_in_histogram(heights: &[i64], origin_x: i64, row: i64, resolution_mm: f64) -> Option<(Rt, f64)> {
    let mut stack: Vec<(usize, i64)> = Vec::new();
    let mut best: Option<(Rt, f64)> = None;
    let n = heights.len();

    for i in 0..=n {
        let h = if i < n { heights[i] } else { 0 };
        let mut start = i;
        while let Some(&(s, sh)) = stack.last() {
            if sh > h {
                stack.pop();
                let width = (i - s) as i64;
                let area = (width * sh) as f64 * resolution_mm * resolution_mm;
                let top_row = row - sh + 1;
                let rect = Rt::new(
                    (origin_x + s as i64) as f64 * resolution_mm,
                    top_row as f64 * resolution_mm,
                    (origin_x + i as i64) as f64 * resolution_mm,
                    (row + 1) as f64 * resolution_mm,
                );
                if best.as_ref().map(|(_, best_area)| area > *best_area).unwrap_or(true) {
                    best = Some((rect, area));
                }
                start = s;
            } else {
                break;
            }
        }
        if i < n {
            stack.push((start, h));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RoutingConfig;
    use crate::model::board::{four_layer_stack, two_layer_stack, Board, BoardPreset};
    use crate::model::component::Kind;
    use crate::model::net::SignalClass;
    use crate::netlist::Netlist;
    use crate::registry::Registry;
    use crate::routing::router::Router;

    #[test]
    fn ground_net_gets_a_plane_on_four_layer_board() {
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let c1 = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        let c2 = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        netlist.component_mut(c1).unwrap().position = Some(crate::model::pt::Pt::new(10.0, 10.0));
        netlist.component_mut(c2).unwrap().position = Some(crate::model::pt::Pt::new(50.0, 10.0));
        let gnd = netlist.add_net("GND", Some(SignalClass::Ground)).unwrap();
        netlist.connect(gnd, c1, "1").unwrap();
        netlist.connect(gnd, c2, "1").unwrap();

        let board = Board::new(BoardPreset::Desktop, four_layer_stack());
        let routing_config = RoutingConfig::default();
        let routed = Router::new(&routing_config).route(&netlist, &board);

        let zone_config = ZoneConfig::default();
        let synth = ZoneSynth::new(&zone_config, routing_config.grid_resolution_mm);
        let zones = synth.synthesize(&netlist, &board, &routed, 2.0, 0.3).unwrap();
        assert_eq!(zones.len(), 1);
        assert!(zones[0].area_mm2() > 0.0);
    }

    #[test]
    fn two_layer_board_has_no_dedicated_power_or_ground_layer_role() {
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        assert_eq!(plane_layer_for(&board, SignalClass::Power), None);
        assert!(plane_layer_for(&board, SignalClass::Ground).is_some());
    }
}

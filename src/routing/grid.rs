use std::collections::HashMap;

use crate::model::board::Board;
use crate::model::ids::LayerId;
use crate::model::pt::{Pt, PtI};
use crate::model::rt::Rt;
use crate::netlist::Netlist;
use crate::registry::data::footprint_size;

/// One cell of the routing grid, on a specific layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub p: PtI,
    pub layer: LayerId,
}

/// Block counts per grid cell; a cell with a non-zero count is obstructed.
/// Counts rather than booleans so overlapping obstacles (a pad under a
/// clearance halo from another pad) can be un-marked independently when a
/// track is ripped up.
pub type BlockMap = HashMap<State, i64>;

/// Maps between millimetre board coordinates and the integer routing grid,
/// and marks component footprints and board edges as obstructed.
#[derive(Debug, Clone)]
pub struct GridModel {
    pub resolution_mm: f64,
    pub layers: Vec<LayerId>,
    board_rect: Rt,
}

impl GridModel {
    pub fn new(board: &Board, resolution_mm: f64) -> Self {
        Self {
            resolution_mm,
            layers: board.layers.iter().map(|l| l.id).collect(),
            board_rect: Rt::new(0.0, 0.0, board.width_mm, board.height_mm),
        }
    }

    pub fn grid_pt(&self, p: Pt) -> PtI {
        PtI::new((p.x / self.resolution_mm).floor() as i64, (p.y / self.resolution_mm).floor() as i64)
    }

    pub fn world_pt(&self, p: PtI) -> Pt {
        Pt::new(p.x as f64 * self.resolution_mm, p.y as f64 * self.resolution_mm)
    }

    pub fn in_bounds(&self, p: PtI) -> bool {
        self.board_rect.contains(self.world_pt(p))
    }

    /// Marks every component footprint (inflated by `clearance_mm`) and the
    /// area outside the board edge as blocked on every layer. Obstacles from
    /// already-placed tracks are marked separately by the router as it goes,
    /// since they are per-net and change across rip-up/retry attempts.
    pub fn mark_components(&self, blk: &mut BlockMap, netlist: &Netlist, clearance_mm: f64) {
        for component in netlist.components() {
            let Some(center) = component.position else { continue };
            let size = footprint_size(&component.footprint_id);
            let half_w = size.w / 2.0 + clearance_mm;
            let half_h = size.h / 2.0 + clearance_mm;
            let rect = Rt::new(center.x - half_w, center.y - half_h, center.x + half_w, center.y + half_h);
            let lo = self.grid_pt(rect.bl());
            let hi = self.grid_pt(rect.tr());
            for layer in &self.layers {
                for x in lo.x..=hi.x {
                    for y in lo.y..=hi.y {
                        *blk.entry(State { p: PtI::new(x, y), layer: *layer }).or_insert(0) += 1;
                    }
                }
            }
        }
    }

    pub fn mark_track(&self, blk: &mut BlockMap, layer: LayerId, cells: &[PtI], delta: i64) {
        for &p in cells {
            *blk.entry(State { p, layer }).or_insert(0) += delta;
        }
    }

    pub fn is_blocked(&self, blk: &BlockMap, s: &State) -> bool {
        !self.in_bounds(s.p) || *blk.get(s).unwrap_or(&0) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};
    use crate::model::component::Kind;
    use crate::registry::Registry;

    #[test]
    fn placed_component_blocks_its_footprint() {
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let grid = GridModel::new(&board, 0.5);
        let registry = Registry::new();
        let mut netlist = Netlist::new();
        let id = netlist.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        netlist.component_mut(id).unwrap().position = Some(Pt::new(10.0, 10.0));
        let mut blk = BlockMap::new();
        grid.mark_components(&mut blk, &netlist, 0.2);
        let s = State { p: grid.grid_pt(Pt::new(10.0, 10.0)), layer: board.layers[0].id };
        assert!(grid.is_blocked(&blk, &s));
    }

    #[test]
    fn outside_board_is_always_blocked() {
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let grid = GridModel::new(&board, 0.5);
        let blk = BlockMap::new();
        let s = State { p: PtI::new(-5, -5), layer: board.layers[0].id };
        assert!(grid.is_blocked(&blk, &s));
    }
}

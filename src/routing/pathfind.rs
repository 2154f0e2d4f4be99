use std::cmp::Reverse;
use std::collections::HashMap;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use crate::model::ids::LayerId;
use crate::model::pt::PtI;
use crate::routing::grid::{BlockMap, GridModel, State};

/// Neighbour offsets on a single layer: four orthogonal moves plus the four
/// diagonals, mirroring the teacher's grid-router direction table.
const MOVES: [(i64, i64); 8] =
    [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Per-search cost knobs threaded in from the routing config and the active
/// net's class rule.
#[derive(Debug, Clone)]
pub struct PathfindParams {
    pub via_preference: f64,
    pub preferred_layer: Option<LayerId>,
    pub non_preferred_layer_penalty: f64,
    /// Layers the active net's class rule steers away from (e.g. control
    /// nets avoiding `front`), on top of the general non-preferred-layer
    /// penalty every other layer already carries.
    pub avoid_layers: Vec<LayerId>,
    pub avoid_layer_penalty: f64,
}

fn move_cost(resolution_mm: f64, dx: i64, dy: i64) -> f64 {
    ((dx * dx + dy * dy) as f64).sqrt() * resolution_mm
}

fn layer_penalty(params: &PathfindParams, layer: LayerId) -> f64 {
    let base = match params.preferred_layer {
        Some(preferred) if preferred != layer => params.non_preferred_layer_penalty,
        _ => 0.0,
    };
    let avoid = if params.avoid_layers.contains(&layer) { params.avoid_layer_penalty } else { 0.0 };
    base + avoid
}

/// A* shortest path from `start` to any of `goals`, on the multi-layer grid.
/// Returns the visited states in order, or `None` if no path satisfies the
/// blocking map within the search budget.
pub fn astar(
    grid: &GridModel,
    blk: &BlockMap,
    params: &PathfindParams,
    start: State,
    goals: &[State],
    max_expansions: usize,
) -> Option<Vec<State>> {
    if goals.is_empty() {
        return None;
    }
    let heuristic = |s: State| -> f64 {
        goals
            .iter()
            .map(|g| s.p.manhattan_dist(g.p) as f64 * grid.resolution_mm)
            .fold(f64::INFINITY, f64::min)
    };

    let mut open: PriorityQueue<State, Reverse<OrderedFloat<f64>>> = PriorityQueue::new();
    let mut g_score: HashMap<State, f64> = HashMap::new();
    let mut came_from: HashMap<State, State> = HashMap::new();

    g_score.insert(start, 0.0);
    open.push(start, Reverse(OrderedFloat(heuristic(start))));

    let mut expansions = 0usize;
    while let Some((current, _)) = open.pop() {
        if goals.contains(&current) {
            return Some(reconstruct(&came_from, current));
        }
        expansions += 1;
        if expansions > max_expansions {
            return None;
        }

        let current_g = g_score[&current];
        for &(dx, dy) in &MOVES {
            let next = State { p: PtI::new(current.p.x + dx, current.p.y + dy), layer: current.layer };
            if grid.is_blocked(blk, &next) {
                continue;
            }
            let tentative = current_g + move_cost(grid.resolution_mm, dx, dy) + layer_penalty(params, next.layer);
            if tentative < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative);
                came_from.insert(next, current);
                open.push(next, Reverse(OrderedFloat(tentative + heuristic(next))));
            }
        }

        for &layer in &grid.layers {
            if layer == current.layer {
                continue;
            }
            let next = State { p: current.p, layer };
            if grid.is_blocked(blk, &next) {
                continue;
            }
            let tentative = current_g + params.via_preference + layer_penalty(params, layer);
            if tentative < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative);
                came_from.insert(next, current);
                open.push(next, Reverse(OrderedFloat(tentative + heuristic(next))));
            }
        }
    }
    None
}

fn reconstruct(came_from: &HashMap<State, State>, mut current: State) -> Vec<State> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::{two_layer_stack, Board, BoardPreset};

    #[test]
    fn finds_direct_path_on_empty_grid() {
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let grid = GridModel::new(&board, 1.0);
        let blk = BlockMap::new();
        let params = PathfindParams {
            via_preference: 5.0,
            preferred_layer: Some(board.layers[0].id),
            non_preferred_layer_penalty: 1.0,
            avoid_layers: Vec::new(),
            avoid_layer_penalty: 0.0,
        };
        let start = State { p: PtI::new(0, 0), layer: board.layers[0].id };
        let goal = State { p: PtI::new(5, 0), layer: board.layers[0].id };
        let path = astar(&grid, &blk, &params, start, &[goal], 10_000).unwrap();
        assert_eq!(*path.first().unwrap(), start);
        assert_eq!(*path.last().unwrap(), goal);
    }

    #[test]
    fn no_path_when_goal_unreachable() {
        let board = Board::new(BoardPreset::Pedal, two_layer_stack());
        let grid = GridModel::new(&board, 1.0);
        let params = PathfindParams {
            via_preference: 5.0,
            preferred_layer: None,
            non_preferred_layer_penalty: 1.0,
            avoid_layers: Vec::new(),
            avoid_layer_penalty: 0.0,
        };
        let start = State { p: PtI::new(0, 0), layer: board.layers[0].id };
        let goal = State { p: PtI::new(10_000, 10_000), layer: board.layers[0].id };
        assert!(astar(&grid, &BlockMap::new(), &params, start, &[goal], 10_000).is_none());
    }
}

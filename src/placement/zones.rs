use crate::model::circle::Circle;
use crate::model::pt::Pt;
use crate::model::rt::Rt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZoneKind {
    Center,
    Edges,
    Top,
    NearOpamps,
}

/// The static placement zones computed once from the board rectangle, plus
/// the dynamic `near_opamps` zone built as op-amps are placed.
#[derive(Debug, Clone)]
pub struct Zones {
    pub center: Rt,
    /// Perimeter strips in `[top, bottom, left, right]` order.
    pub edges: [Rt; 4],
    pub top: Rt,
}

impl Zones {
    /// `board_rect` is the full board outline; `margin_percentage` insets it
    /// before dividing into the center/edges/top rectangles, per the
    /// placement engine's zone-computation step.
    pub fn compute(board_rect: Rt, margin_percentage: f64) -> Self {
        let dx = board_rect.w() * margin_percentage;
        let dy = board_rect.h() * margin_percentage;
        let inset = board_rect.inset(dx, dy);
        let col = inset.w() / 3.0;
        let row = inset.h() / 3.0;
        let center = Rt::new(inset.l() + col, inset.b() + row, inset.l() + 2.0 * col, inset.b() + 2.0 * row);
        let top = Rt::new(inset.l(), inset.b() + 2.0 * row, inset.r(), inset.t());
        let bottom = Rt::new(inset.l(), inset.b(), inset.r(), inset.b() + row);
        let left = Rt::new(inset.l(), inset.b(), inset.l() + col, inset.t());
        let right = Rt::new(inset.r() - col, inset.b(), inset.r(), inset.t());
        Self { center, edges: [top, bottom, left, right], top }
    }

    /// Dynamic disks of `radius` around each already-placed op-amp.
    pub fn near_opamps(&self, opamp_positions: &[Pt], radius: f64) -> Vec<Circle> {
        opamp_positions.iter().map(|&p| Circle::new(p, radius)).collect()
    }

    pub fn rect_for(&self, kind: ZoneKind) -> Rt {
        match kind {
            ZoneKind::Center => self.center,
            ZoneKind::Top => self.top,
            ZoneKind::Edges => self.edges.iter().fold(Rt::empty(), |acc, r| acc.united(r)),
            ZoneKind::NearOpamps => self.center,
        }
    }
}

/// Deterministic grid candidate positions inside `rect`, spaced by
/// `grid_spacing_percentage` of the larger board dimension, in row-major
/// order (bottom-to-top, left-to-right).
pub fn grid_candidates(rect: Rt, board_dim_mm: f64, grid_spacing_percentage: f64) -> Vec<Pt> {
    let step = (board_dim_mm * grid_spacing_percentage).max(0.5);
    let mut out = Vec::new();
    let mut y = rect.b();
    while y <= rect.t() {
        let mut x = rect.l();
        while x <= rect.r() {
            out.push(Pt::new(x, y));
            x += step;
        }
        y += step;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_zone_is_middle_third_of_inset_board() {
        let board = Rt::new(0.0, 0.0, 100.0, 100.0);
        let zones = Zones::compute(board, 0.10);
        let inset = board.inset(10.0, 10.0);
        assert!((zones.center.w() - inset.w() / 3.0).abs() < 1e-9);
        assert!(inset.contains_rt(&zones.center));
    }

    #[test]
    fn grid_candidates_cover_rect_bounds() {
        let rect = Rt::new(0.0, 0.0, 10.0, 10.0);
        let pts = grid_candidates(rect, 100.0, 0.05);
        assert!(pts.iter().any(|p| p.x == 0.0 && p.y == 0.0));
        assert!(pts.iter().all(|p| rect.contains(*p)));
    }
}

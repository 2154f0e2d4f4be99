use serde::{Deserialize, Serialize};

use crate::model::pt::Pt;
use crate::model::rt::Rt;

/// A closed polygon outline, used for board outlines, component silhouettes,
/// keepouts, and copper zone boundaries. Points are stored in order but are
/// not required to be wound a particular direction; callers that need a
/// winding order call [`Polygon::ensure_ccw`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub pts: Vec<Pt>,
}

impl Polygon {
    pub fn new(pts: Vec<Pt>) -> Self {
        Self { pts }
    }

    pub fn rect(r: Rt) -> Self {
        Self::new(r.pts().to_vec())
    }

    pub fn bounds(&self) -> Rt {
        let mut r = Rt::empty();
        for &p in &self.pts {
            r = r.united(&Rt::new(p.x, p.y, p.x, p.y));
        }
        r
    }

    pub fn edges(&self) -> impl Iterator<Item = (Pt, Pt)> + '_ {
        let n = self.pts.len();
        (0..n).map(move |i| (self.pts[i], self.pts[(i + 1) % n]))
    }

    pub fn area(&self) -> f64 {
        let mut a = 0.0;
        for (p0, p1) in self.edges() {
            a += p0.cross(p1);
        }
        a.abs() / 2.0
    }

    pub fn is_ccw(&self) -> bool {
        let mut a = 0.0;
        for (p0, p1) in self.edges() {
            a += p0.cross(p1);
        }
        a > 0.0
    }

    pub fn ensure_ccw(&mut self) {
        if self.pts.len() > 2 && !self.is_ccw() {
            self.pts.reverse();
        }
    }

    /// Ray-casting point-in-polygon test (even-odd rule).
    pub fn contains_pt(&self, p: Pt) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            let straddles = (a.y > p.y) != (b.y > p.y);
            if straddles {
                let x_at_y = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_at_y {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn contains_rt(&self, r: &Rt) -> bool {
        r.pts().iter().all(|&p| self.contains_pt(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_contains_center() {
        let p = Polygon::rect(Rt::new(0.0, 0.0, 10.0, 10.0));
        assert!(p.contains_pt(Pt::new(5.0, 5.0)));
        assert!(!p.contains_pt(Pt::new(15.0, 5.0)));
    }

    #[test]
    fn ensure_ccw_flips_cw_polygon() {
        let mut p = Polygon::new(vec![
            Pt::new(0.0, 0.0),
            Pt::new(0.0, 10.0),
            Pt::new(10.0, 10.0),
            Pt::new(10.0, 0.0),
        ]);
        assert!(!p.is_ccw());
        p.ensure_ccw();
        assert!(p.is_ccw());
    }

    #[test]
    fn area_of_unit_square() {
        let p = Polygon::rect(Rt::new(0.0, 0.0, 1.0, 1.0));
        assert!((p.area() - 1.0).abs() < 1e-9);
    }
}

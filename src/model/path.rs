use serde::{Deserialize, Serialize};

use crate::model::pt::Pt;
use crate::model::rt::Rt;

/// A polyline with a uniform width, i.e. a chain of capsules. Used for both
/// tracks (copper) and thermal-relief spokes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub pts: Vec<Pt>,
    pub width: f64,
}

impl Path {
    pub fn new(pts: Vec<Pt>, width: f64) -> Self {
        Self { pts, width }
    }

    pub fn segments(&self) -> impl Iterator<Item = (Pt, Pt)> + '_ {
        self.pts.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.dist(b)).sum()
    }

    pub fn bounds(&self) -> Rt {
        let mut r = Rt::empty();
        let half = self.width / 2.0;
        for &p in &self.pts {
            r = r.united(&Rt::new(p.x - half, p.y - half, p.x + half, p.y + half));
        }
        r
    }

    /// Minimum distance from `p` to any segment of this path, ignoring width.
    pub fn dist_to_pt(&self, p: Pt) -> f64 {
        self.segments()
            .map(|(a, b)| pt_seg_dist(p, a, b))
            .fold(f64::MAX, f64::min)
    }
}

/// Distance from point `p` to the segment `(a, b)`.
pub fn pt_seg_dist(p: Pt, a: Pt, b: Pt) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 == 0.0 {
        return p.dist(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    let proj = a + ab * t;
    p.dist(proj)
}

/// Distance between segments `(a0, a1)` and `(b0, b1)`; zero if they cross.
pub fn seg_seg_dist(a0: Pt, a1: Pt, b0: Pt, b1: Pt) -> f64 {
    if segs_intersect(a0, a1, b0, b1) {
        return 0.0;
    }
    [
        pt_seg_dist(a0, b0, b1),
        pt_seg_dist(a1, b0, b1),
        pt_seg_dist(b0, a0, a1),
        pt_seg_dist(b1, a0, a1),
    ]
    .into_iter()
    .fold(f64::MAX, f64::min)
}

fn orient(a: Pt, b: Pt, c: Pt) -> f64 {
    (b - a).cross(c - a)
}

/// True if closed segments `(a0, a1)` and `(b0, b1)` share any point.
pub fn segs_intersect(a0: Pt, a1: Pt, b0: Pt, b1: Pt) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);
    if ((d1 > 0.0) != (d2 > 0.0)) && ((d3 > 0.0) != (d4 > 0.0)) {
        return true;
    }
    fn on_seg(a: Pt, b: Pt, p: Pt) -> bool {
        p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
    }
    (d1 == 0.0 && on_seg(b0, b1, a0))
        || (d2 == 0.0 && on_seg(b0, b1, a1))
        || (d3 == 0.0 && on_seg(a0, a1, b0))
        || (d4 == 0.0 && on_seg(a0, a1, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_seg_dist_perpendicular() {
        let d = pt_seg_dist(Pt::new(1.0, 1.0), Pt::new(0.0, 0.0), Pt::new(2.0, 0.0));
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn crossing_segments_have_zero_distance() {
        let d = seg_seg_dist(
            Pt::new(0.0, 0.0),
            Pt::new(2.0, 2.0),
            Pt::new(0.0, 2.0),
            Pt::new(2.0, 0.0),
        );
        assert_eq!(d, 0.0);
    }

    #[test]
    fn path_length_sums_segments() {
        let p = Path::new(vec![Pt::new(0.0, 0.0), Pt::new(3.0, 0.0), Pt::new(3.0, 4.0)], 0.3);
        assert!((p.length() - 7.0).abs() < 1e-9);
    }
}

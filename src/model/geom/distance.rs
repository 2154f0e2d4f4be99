use crate::model::circle::Circle;
use crate::model::path::{pt_seg_dist, seg_seg_dist};
use crate::model::polygon::Polygon;
use crate::model::rt::Rt;
use crate::model::shape::Shape;

/// Distance from a point to the nearest edge of a rectangle; zero if inside.
pub fn pt_rt_dist(p: crate::model::pt::Pt, r: &Rt) -> f64 {
    if r.contains(p) {
        return 0.0;
    }
    let dx = (r.l() - p.x).max(0.0).max(p.x - r.r());
    let dy = (r.b() - p.y).max(0.0).max(p.y - r.t());
    (dx * dx + dy * dy).sqrt()
}

pub fn circ_rt_dist(a: &Circle, b: &Rt) -> f64 {
    (pt_rt_dist(a.p, b) - a.r).max(0.0)
}

pub fn circ_circ_dist(a: &Circle, b: &Circle) -> f64 {
    (a.p.dist(b.p) - a.r - b.r).max(0.0)
}

pub fn rt_rt_dist(a: &Rt, b: &Rt) -> f64 {
    a.clearance(b).max(0.0)
}

pub fn poly_poly_dist(a: &Polygon, b: &Polygon) -> f64 {
    if super::intersects::poly_intersects_poly(a, b) {
        return 0.0;
    }
    let mut best = f64::MAX;
    for (p0, p1) in a.edges() {
        for (q0, q1) in b.edges() {
            best = best.min(seg_seg_dist(p0, p1, q0, q1));
        }
    }
    best
}

/// Minimum distance between two arbitrary shapes. Zero means touching or
/// overlapping. This only covers the shape pairs the board pipeline actually
/// produces (rect/circle/polygon/path combinations); it is not a general
/// computational-geometry kernel.
pub fn shape_dist(a: &Shape, b: &Shape) -> f64 {
    use Shape::*;
    match (a, b) {
        (Rect(a), Rect(b)) => rt_rt_dist(a, b),
        (Rect(r), Circle(c)) | (Circle(c), Rect(r)) => circ_rt_dist(c, r),
        (Circle(a), Circle(b)) => circ_circ_dist(a, b),
        (Polygon(a), Polygon(b)) => poly_poly_dist(a, b),
        (Rect(r), Polygon(p)) | (Polygon(p), Rect(r)) => {
            poly_poly_dist(p, &Polygon::rect(*r))
        }
        (Circle(c), Polygon(p)) | (Polygon(p), Circle(c)) => {
            if p.contains_pt(c.p) {
                0.0
            } else {
                let mut best = f64::MAX;
                for (p0, p1) in p.edges() {
                    best = best.min(pt_seg_dist(c.p, p0, p1));
                }
                (best - c.r).max(0.0)
            }
        }
        (Path(path), other) | (other, Path(path)) => {
            let mut best = f64::MAX;
            for (p0, p1) in path.segments() {
                best = best.min(seg_to_shape_dist(p0, p1, other));
            }
            (best - path.width / 2.0).max(0.0)
        }
    }
}

fn seg_to_shape_dist(p0: crate::model::pt::Pt, p1: crate::model::pt::Pt, s: &Shape) -> f64 {
    match s {
        Shape::Rect(r) => {
            if r.contains(p0) || r.contains(p1) {
                0.0
            } else {
                let corners = r.pts();
                (0..4)
                    .map(|i| seg_seg_dist(p0, p1, corners[i], corners[(i + 1) % 4]))
                    .fold(f64::MAX, f64::min)
            }
        }
        Shape::Circle(c) => (pt_seg_dist(c.p, p0, p1) - c.r).max(0.0),
        Shape::Polygon(poly) => {
            if poly.contains_pt(p0) || poly.contains_pt(p1) {
                0.0
            } else {
                poly.edges().map(|(q0, q1)| crate::model::path::seg_seg_dist(p0, p1, q0, q1)).fold(
                    f64::MAX,
                    f64::min,
                )
            }
        }
        Shape::Path(other) => {
            let mut best = f64::MAX;
            for (q0, q1) in other.segments() {
                best = best.min(crate::model::path::seg_seg_dist(p0, p1, q0, q1));
            }
            (best - other.width / 2.0).max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pt::Pt;

    #[test]
    fn pt_inside_rect_has_zero_dist() {
        let r = Rt::new(0.0, 0.0, 2.0, 2.0);
        assert_eq!(pt_rt_dist(Pt::new(1.0, 1.0), &r), 0.0);
    }

    #[test]
    fn circ_circ_dist_subtracts_radii() {
        let a = Circle::new(Pt::zero(), 1.0);
        let b = Circle::new(Pt::new(5.0, 0.0), 1.0);
        assert!((circ_circ_dist(&a, &b) - 3.0).abs() < 1e-9);
    }
}

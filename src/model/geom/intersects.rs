use crate::model::circle::Circle;
use crate::model::geom::distance::shape_dist;
use crate::model::path::segs_intersect;
use crate::model::polygon::Polygon;
use crate::model::rt::Rt;
use crate::model::shape::Shape;

pub fn circ_intersects_rt(a: &Circle, b: &Rt) -> bool {
    b.contains(a.p) || crate::model::geom::distance::circ_rt_dist(a, b) <= 0.0
}

pub fn circ_intersects_circ(a: &Circle, b: &Circle) -> bool {
    a.p.dist(b.p) <= a.r + b.r
}

pub fn poly_intersects_rt(a: &Polygon, b: &Rt) -> bool {
    if a.bounds().intersects(b) {
        return poly_intersects_poly(a, &Polygon::rect(*b));
    }
    false
}

pub fn poly_intersects_poly(a: &Polygon, b: &Polygon) -> bool {
    if !a.bounds().intersects(&b.bounds()) {
        return false;
    }
    // Any vertex of one inside the other.
    if a.pts.iter().any(|&p| b.contains_pt(p)) || b.pts.iter().any(|&p| a.contains_pt(p)) {
        return true;
    }
    // Any pair of edges crossing.
    for (p0, p1) in a.edges() {
        for (q0, q1) in b.edges() {
            if segs_intersect(p0, p1, q0, q1) {
                return true;
            }
        }
    }
    false
}

pub fn poly_intersects_circ(a: &Polygon, c: &Circle) -> bool {
    if a.contains_pt(c.p) {
        return true;
    }
    a.edges().any(|(p0, p1)| crate::model::path::pt_seg_dist(c.p, p0, p1) <= c.r)
}

/// General shape×shape intersection test, covering the pairs the pipeline
/// actually produces (see [`shape_dist`]).
pub fn shapes_intersect(a: &Shape, b: &Shape) -> bool {
    use Shape::*;
    match (a, b) {
        (Rect(a), Rect(b)) => a.intersects(b),
        (Rect(r), Circle(c)) | (Circle(c), Rect(r)) => circ_intersects_rt(c, r),
        (Circle(a), Circle(b)) => circ_intersects_circ(a, b),
        (Polygon(a), Polygon(b)) => poly_intersects_poly(a, b),
        (Rect(r), Polygon(p)) | (Polygon(p), Rect(r)) => poly_intersects_rt(p, r),
        (Circle(c), Polygon(p)) | (Polygon(p), Circle(c)) => poly_intersects_circ(p, c),
        _ => shape_dist(a, b) <= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pt::Pt;

    #[test]
    fn overlapping_circles_intersect() {
        let a = Circle::new(Pt::zero(), 1.0);
        let b = Circle::new(Pt::new(1.5, 0.0), 1.0);
        assert!(circ_intersects_circ(&a, &b));
        let c = Circle::new(Pt::new(5.0, 0.0), 1.0);
        assert!(!circ_intersects_circ(&a, &c));
    }

    #[test]
    fn overlapping_polygons_intersect() {
        let a = Polygon::rect(Rt::new(0.0, 0.0, 2.0, 2.0));
        let b = Polygon::rect(Rt::new(1.0, 1.0, 3.0, 3.0));
        let c = Polygon::rect(Rt::new(5.0, 5.0, 6.0, 6.0));
        assert!(poly_intersects_poly(&a, &b));
        assert!(!poly_intersects_poly(&a, &c));
    }
}

use serde::{Deserialize, Serialize};

use crate::model::circle::Circle;
use crate::model::geom::{contains, distance, intersects};
use crate::model::path::Path;
use crate::model::polygon::Polygon;
use crate::model::pt::Pt;
use crate::model::rt::Rt;

/// The closed set of 2D shapes the board model needs: component outlines,
/// pads, keepouts, zone fills, and track/spoke geometry are all one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect(Rt),
    Circle(Circle),
    Polygon(Polygon),
    Path(Path),
}

impl Shape {
    pub fn bounds(&self) -> Rt {
        match self {
            Shape::Rect(r) => *r,
            Shape::Circle(c) => c.bounds(),
            Shape::Polygon(p) => p.bounds(),
            Shape::Path(p) => p.bounds(),
        }
    }

    pub fn contains_pt(&self, p: Pt) -> bool {
        match self {
            Shape::Rect(r) => r.contains(p),
            Shape::Circle(c) => contains::circ_contains_pt(c, p),
            Shape::Polygon(poly) => poly.contains_pt(p),
            Shape::Path(path) => path.dist_to_pt(p) <= path.width / 2.0,
        }
    }

    pub fn intersects(&self, o: &Shape) -> bool {
        intersects::shapes_intersect(self, o)
    }

    pub fn dist_to(&self, o: &Shape) -> f64 {
        distance::shape_dist(self, o)
    }

    pub fn translated(&self, d: Pt) -> Shape {
        match self {
            Shape::Rect(r) => Shape::Rect(r.translated(d)),
            Shape::Circle(c) => Shape::Circle(Circle::new(c.p + d, c.r)),
            Shape::Polygon(p) => Shape::Polygon(Polygon::new(p.pts.iter().map(|&v| v + d).collect())),
            Shape::Path(p) => Shape::Path(Path::new(p.pts.iter().map(|&v| v + d).collect(), p.width)),
        }
    }

    pub fn rotated(&self, deg: f64) -> Shape {
        if deg == 0.0 {
            return self.clone();
        }
        match self {
            Shape::Rect(r) => Shape::Polygon(Polygon::new(r.pts().iter().map(|&p| p.rotated(deg)).collect())),
            Shape::Circle(c) => Shape::Circle(Circle::new(c.p.rotated(deg), c.r)),
            Shape::Polygon(p) => Shape::Polygon(Polygon::new(p.pts.iter().map(|&v| v.rotated(deg)).collect())),
            Shape::Path(p) => Shape::Path(Path::new(p.pts.iter().map(|&v| v.rotated(deg)).collect(), p.width)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_pt() {
        let s = Shape::Rect(Rt::new(0.0, 0.0, 2.0, 2.0));
        assert!(s.contains_pt(Pt::new(1.0, 1.0)));
        assert!(!s.contains_pt(Pt::new(3.0, 1.0)));
    }

    #[test]
    fn translated_rect_moves_bounds() {
        let s = Shape::Rect(Rt::new(0.0, 0.0, 2.0, 2.0));
        let t = s.translated(Pt::new(1.0, 1.0));
        assert_eq!(t.bounds(), Rt::new(1.0, 1.0, 3.0, 3.0));
    }
}

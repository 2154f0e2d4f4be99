use std::f64::consts::PI;
use std::ops::Mul;

use nalgebra::{vector, Matrix3};

use crate::model::circle::Circle;
use crate::model::path::Path;
use crate::model::polygon::Polygon;
use crate::model::pt::Pt;
use crate::model::rt::Rt;
use crate::model::shape::Shape;

/// A 2D affine transform, used to place component geometry (defined in a
/// footprint's local coordinate space) onto the board.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Tf {
    m: Matrix3<f64>,
}

impl Tf {
    pub fn identity() -> Self {
        Self { m: Matrix3::identity() }
    }

    pub fn scale(p: Pt) -> Self {
        Self { m: Matrix3::new_nonuniform_scaling(&p.into()) }
    }

    pub fn translate(p: Pt) -> Self {
        Self { m: Matrix3::new_translation(&p.into()) }
    }

    pub fn rotate(deg: f64) -> Self {
        Self { m: Matrix3::new_rotation(deg / 180.0 * PI) }
    }

    pub fn affine(from: &Rt, to: &Rt) -> Self {
        let xscale = to.w() / from.w();
        let yscale = to.h() / from.h();
        let offset = to.tl() - from.tl();
        Self::translate(offset) * Self::scale(Pt::new(xscale, yscale))
    }

    pub fn inv(&self) -> Tf {
        Tf { m: self.m.try_inverse().expect("transform must be invertible") }
    }

    pub fn pt(&self, p: Pt) -> Pt {
        let v = self.m * vector![p.x, p.y, 1.0];
        Pt::new(v.x, v.y)
    }

    pub fn rt(&self, r: &Rt) -> Rt {
        let a = self.pt(r.tl());
        let b = self.pt(r.br());
        Rt::enclosing(a, b)
    }

    fn scale_factor(&self) -> f64 {
        let origin = self.pt(Pt::zero());
        self.pt(Pt::new(1.0, 0.0)).dist(origin)
    }

    pub fn circle(&self, c: &Circle) -> Circle {
        Circle::new(self.pt(c.p), c.r * self.scale_factor())
    }

    pub fn polygon(&self, p: &Polygon) -> Polygon {
        Polygon::new(p.pts.iter().map(|&v| self.pt(v)).collect())
    }

    pub fn path(&self, p: &Path) -> Path {
        Path::new(p.pts.iter().map(|&v| self.pt(v)).collect(), p.width * self.scale_factor())
    }

    pub fn shape(&self, s: &Shape) -> Shape {
        match s {
            Shape::Rect(r) => Shape::Rect(self.rt(r)),
            Shape::Circle(c) => Shape::Circle(self.circle(c)),
            Shape::Polygon(p) => Shape::Polygon(self.polygon(p)),
            Shape::Path(p) => Shape::Path(self.path(p)),
        }
    }

    pub fn pts(&self, p: &[Pt]) -> Vec<Pt> {
        p.iter().map(|&v| self.pt(v)).collect()
    }
}

impl Mul<Tf> for Tf {
    type Output = Tf;

    fn mul(self, rhs: Tf) -> Self::Output {
        Tf { m: self.m * rhs.m }
    }
}

impl Mul<Tf> for &Tf {
    type Output = Tf;

    fn mul(self, rhs: Tf) -> Self::Output {
        Tf { m: self.m * rhs.m }
    }
}

impl Mul<&Tf> for Tf {
    type Output = Tf;

    fn mul(self, rhs: &Tf) -> Self::Output {
        Tf { m: self.m * rhs.m }
    }
}

impl Mul<&Tf> for &Tf {
    type Output = Tf;

    fn mul(self, rhs: &Tf) -> Self::Output {
        Tf { m: self.m * rhs.m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_then_pt() {
        let tf = Tf::translate(Pt::new(1.0, 2.0));
        assert_eq!(tf.pt(Pt::zero()), Pt::new(1.0, 2.0));
    }

    #[test]
    fn rotate_90_swaps_axes() {
        let tf = Tf::rotate(90.0);
        let p = tf.pt(Pt::new(1.0, 0.0));
        assert!(p.x.abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn composed_transform_applies_in_order() {
        let tf = Tf::translate(Pt::new(10.0, 0.0)) * Tf::rotate(90.0);
        let p = tf.pt(Pt::new(1.0, 0.0));
        assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9);
    }
}

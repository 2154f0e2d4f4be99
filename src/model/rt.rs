use auto_ops::impl_op_ex_commutative;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::model::geom::math::{eq, ge, gt, le, lt};
use crate::model::pt::{Pt, PtI};

/// An axis-aligned rectangle, covering the closed range `[l, r] x [b, t]`.
///
/// Empty rectangles have `r < l` or `t < b`; a rectangle with `l == r` and
/// `b == t` is a single point and is not considered empty.
#[derive(Debug, Copy, Clone, Display, Serialize, Deserialize)]
#[display(fmt = "({}, {}, {}, {})", l, b, r, t)]
pub struct Rt {
    l: f64,
    b: f64,
    r: f64,
    t: f64,
}

impl Default for Rt {
    fn default() -> Self {
        Self::empty()
    }
}

impl Rt {
    pub const fn new(l: f64, b: f64, r: f64, t: f64) -> Self {
        Self { l, b, r, t }
    }

    pub const fn empty() -> Self {
        Self::new(0.0, 0.0, -1.0, -1.0)
    }

    pub fn is_empty(&self) -> bool {
        lt(self.r, self.l) || lt(self.t, self.b)
    }

    pub fn w(&self) -> f64 {
        self.r - self.l
    }

    pub fn h(&self) -> f64 {
        self.t - self.b
    }

    pub const fn l(&self) -> f64 {
        self.l
    }

    pub const fn t(&self) -> f64 {
        self.t
    }

    pub const fn r(&self) -> f64 {
        self.r
    }

    pub const fn b(&self) -> f64 {
        self.b
    }

    pub const fn bl(&self) -> Pt {
        Pt::new(self.l, self.b)
    }

    pub const fn br(&self) -> Pt {
        Pt::new(self.r, self.b)
    }

    pub const fn tl(&self) -> Pt {
        Pt::new(self.l, self.t)
    }

    pub const fn tr(&self) -> Pt {
        Pt::new(self.r, self.t)
    }

    pub const fn pts(&self) -> [Pt; 4] {
        [self.bl(), self.br(), self.tr(), self.tl()]
    }

    pub fn center(&self) -> Pt {
        Pt::new((self.l + self.r) / 2.0, (self.b + self.t) / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.w() * self.h()
    }

    /// Insets by `dx`/`dy` on each side. Insetting past the rectangle's size
    /// collapses it to the single center point.
    pub fn inset(&self, dx: f64, dy: f64) -> Rt {
        let wsub = self.w().min(2.0 * dx) / 2.0;
        let hsub = self.h().min(2.0 * dy) / 2.0;
        Rt::new(self.l + wsub, self.b + hsub, self.r - wsub, self.t - hsub)
    }

    pub fn translated(&self, p: Pt) -> Rt {
        Rt::new(self.l + p.x, self.b + p.y, self.r + p.x, self.t + p.y)
    }

    pub fn contains(&self, p: Pt) -> bool {
        ge(p.x, self.l()) && ge(p.y, self.b()) && le(p.x, self.r()) && le(p.y, self.t())
    }

    pub fn contains_rt(&self, o: &Rt) -> bool {
        self.contains(o.bl()) && self.contains(o.tr())
    }

    pub fn intersects(&self, r: &Rt) -> bool {
        le(self.l(), r.r()) && ge(self.r(), r.l()) && ge(self.t(), r.b()) && le(self.b(), r.t())
    }

    /// Edge-to-edge clearance between two rectangles; zero or negative if they overlap.
    pub fn clearance(&self, r: &Rt) -> f64 {
        let dx = (self.l() - r.r()).max(r.l() - self.r());
        let dy = (self.b() - r.t()).max(r.b() - self.t());
        if dx.max(dy) < 0.0 {
            dx.max(dy)
        } else if dx < 0.0 {
            dy
        } else if dy < 0.0 {
            dx
        } else {
            (dx * dx + dy * dy).sqrt()
        }
    }

    pub fn united(&self, rect: &Rt) -> Rt {
        if rect.is_empty() {
            *self
        } else if self.is_empty() {
            *rect
        } else {
            let l = self.l.min(rect.l);
            let b = self.b.min(rect.b);
            let r = self.r().max(rect.r());
            let t = self.t().max(rect.t());
            Rt::new(l, b, r, t)
        }
    }

    pub fn enclosing(pa: Pt, pb: Pt) -> Rt {
        let l = pa.x.min(pb.x);
        let b = pa.y.min(pb.y);
        let r = pa.x.max(pb.x);
        let t = pa.y.max(pb.y);
        Rt::new(l, b, r, t)
    }

    /// A rectangle of the given size centered on `p`.
    pub fn centered(p: Pt, w: f64, h: f64) -> Rt {
        Rt::new(p.x - w / 2.0, p.y - h / 2.0, p.x + w / 2.0, p.y + h / 2.0)
    }
}

impl PartialEq for Rt {
    fn eq(&self, o: &Self) -> bool {
        eq(self.l, o.l) && eq(self.b, o.b) && eq(self.r, o.r) && eq(self.t, o.t)
    }
}

impl_op_ex_commutative!(*|a: &Rt, b: &f64| -> Rt { Rt::new(a.l * b, a.b * b, a.r * b, a.t * b) });

/// An axis-aligned rectangle on the integer routing grid, stored as
/// origin + extent (as opposed to [`Rt`]'s two-corner form) since grid
/// rectangles are built by extent far more often than by corner pair.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Display)]
#[display(fmt = "({}, {}, {}, {})", x, y, w, h)]
pub struct RtI {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl RtI {
    pub const fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    pub const fn w(&self) -> i64 {
        self.w
    }

    pub const fn h(&self) -> i64 {
        self.h
    }

    pub const fn l(&self) -> i64 {
        self.x
    }

    pub const fn t(&self) -> i64 {
        self.y + self.h
    }

    pub const fn r(&self) -> i64 {
        self.x + self.w
    }

    pub const fn b(&self) -> i64 {
        self.y
    }

    pub fn enclosing(pa: PtI, pb: PtI) -> RtI {
        let x = pa.x.min(pb.x);
        let y = pa.y.min(pb.y);
        let r = pa.x.max(pb.x);
        let t = pa.y.max(pb.y);
        RtI::new(x, y, r - x, t - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_collapses_to_center() {
        let r = Rt::new(0.0, 0.0, 2.0, 2.0);
        let inset = r.inset(5.0, 5.0);
        assert_eq!(inset.center(), r.center());
        assert!(inset.w() <= 1e-9 && inset.h() <= 1e-9);
    }

    #[test]
    fn intersects_detects_overlap() {
        let a = Rt::new(0.0, 0.0, 2.0, 2.0);
        let b = Rt::new(1.0, 1.0, 3.0, 3.0);
        let c = Rt::new(5.0, 5.0, 6.0, 6.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn clearance_between_disjoint_rects() {
        let a = Rt::new(0.0, 0.0, 1.0, 1.0);
        let b = Rt::new(2.0, 0.0, 3.0, 1.0);
        assert!((a.clearance(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn united_grows_bounds() {
        let a = Rt::new(0.0, 0.0, 1.0, 1.0);
        let b = Rt::new(2.0, 2.0, 3.0, 3.0);
        let u = a.united(&b);
        assert_eq!(u, Rt::new(0.0, 0.0, 3.0, 3.0));
    }
}

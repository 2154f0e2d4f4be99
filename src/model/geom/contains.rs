use crate::model::circle::Circle;
use crate::model::geom::math::le;
use crate::model::pt::Pt;

pub fn circ_contains_pt(a: &Circle, b: Pt) -> bool {
    le(a.p.dist(b), a.r)
}

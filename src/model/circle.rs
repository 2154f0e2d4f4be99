use serde::{Deserialize, Serialize};

use crate::model::pt::Pt;
use crate::model::rt::Rt;

/// A circular pad, via land, or keepout.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub p: Pt,
    pub r: f64,
}

impl Circle {
    pub const fn new(p: Pt, r: f64) -> Self {
        Self { p, r }
    }

    pub fn bounds(&self) -> Rt {
        Rt::new(self.p.x - self.r, self.p.y - self.r, self.p.x + self.r, self.p.y + self.r)
    }
}

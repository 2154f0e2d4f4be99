use serde::{Deserialize, Serialize};

use crate::model::pt::Pt;

/// A 2D size (width, height), in millimetres.
#[derive(Debug, Default, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Sz {
    pub w: f64,
    pub h: f64,
}

impl Sz {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn as_pt(&self) -> Pt {
        Pt::new(self.w, self.h)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

impl From<Pt> for Sz {
    fn from(p: Pt) -> Self {
        Sz::new(p.x, p.y)
    }
}

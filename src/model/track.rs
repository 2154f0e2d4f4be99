use serde::{Deserialize, Serialize};

use crate::model::ids::{LayerId, NetId};
use crate::model::path::Path;
use crate::model::pt::Pt;

/// A copper trace: an ordered polyline of points on one layer, belonging to a
/// net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub net: NetId,
    pub layer: LayerId,
    pub pts: Vec<Pt>,
    pub width_mm: f64,
}

impl Track {
    pub fn new(net: NetId, layer: LayerId, pts: Vec<Pt>, width_mm: f64) -> Self {
        Self { net, layer, pts, width_mm }
    }

    pub fn path(&self) -> Path {
        Path::new(self.pts.clone(), self.width_mm)
    }

    pub fn length_mm(&self) -> f64 {
        self.path().length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_length_matches_its_path() {
        let t = Track::new(NetId(0), LayerId(0), vec![Pt::zero(), Pt::new(3.0, 4.0)], 0.3);
        assert!((t.length_mm() - 5.0).abs() < 1e-9);
    }
}

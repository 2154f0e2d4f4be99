use serde::{Deserialize, Serialize};

use crate::model::ids::{LayerId, NetId};
use crate::model::pt::Pt;

/// A plated through-hole connecting copper on two layers, belonging to a net.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub net: NetId,
    pub p: Pt,
    pub drill_mm: f64,
    pub outer_diameter_mm: f64,
    pub from_layer: LayerId,
    pub to_layer: LayerId,
}

impl Via {
    pub fn new(net: NetId, p: Pt, drill_mm: f64, outer_diameter_mm: f64, from_layer: LayerId, to_layer: LayerId) -> Self {
        Self { net, p, drill_mm, outer_diameter_mm, from_layer, to_layer }
    }

    pub fn connects(&self, layer: LayerId) -> bool {
        self.from_layer == layer || self.to_layer == layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn via_connects_both_its_layers() {
        let v = Via::new(NetId(0), Pt::zero(), 0.3, 0.6, LayerId(0), LayerId(1));
        assert!(v.connects(LayerId(0)));
        assert!(v.connects(LayerId(1)));
        assert!(!v.connects(LayerId(2)));
    }
}

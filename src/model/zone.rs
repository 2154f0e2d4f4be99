use serde::{Deserialize, Serialize};

use crate::model::ids::{LayerId, NetId};
use crate::model::net::PinRef;
use crate::model::polygon::Polygon;

/// Thermal-relief spoke parameters for pads of the zone's own net, and the
/// optional star-grounding policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalReliefPolicy {
    pub spoke_width_mm: (f64, f64),
    pub spoke_gap_mm: (f64, f64),
    pub star_grounding: bool,
    pub star_point: Option<PinRef>,
}

impl Default for ThermalReliefPolicy {
    fn default() -> Self {
        Self {
            spoke_width_mm: (0.3, 0.5),
            spoke_gap_mm: (0.2, 0.4),
            star_grounding: false,
            star_point: None,
        }
    }
}

/// A poured copper region on one layer, assigned to a net (typically GND,
/// VCC, VEE, +12V, -12V, +5V).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub net: NetId,
    pub layer: LayerId,
    pub outline: Polygon,
    pub clearance_mm: f64,
    pub thermal_relief: ThermalReliefPolicy,
}

impl Zone {
    pub fn new(net: NetId, layer: LayerId, outline: Polygon, clearance_mm: f64) -> Self {
        Self { net, layer, outline, clearance_mm, thermal_relief: ThermalReliefPolicy::default() }
    }

    pub fn area_mm2(&self) -> f64 {
        self.outline.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rt::Rt;

    #[test]
    fn zone_area_matches_outline() {
        let z = Zone::new(NetId(0), LayerId(2), Polygon::rect(Rt::new(0.0, 0.0, 10.0, 10.0)), 0.3);
        assert!((z.area_mm2() - 100.0).abs() < 1e-9);
    }
}

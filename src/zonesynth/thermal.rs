use crate::config::types::ZoneConfig;
use crate::model::net::{Net, PinRef, SignalClass};
use crate::model::zone::ThermalReliefPolicy;

/// Builds the thermal-relief policy for a plane-carrying net: spoke
/// width/gap come straight from configuration; star grounding only applies
/// to ground nets and only when a star point pin has been nominated.
pub fn relief_policy_for(net: &Net, config: &ZoneConfig) -> ThermalReliefPolicy {
    let star_point = if net.signal_class == SignalClass::Ground {
        config.star_ground_pin.as_ref().and_then(|pin| resolve_star_point(net, pin))
    } else {
        None
    };
    ThermalReliefPolicy {
        spoke_width_mm: (config.min_thermal_bridge_mm, config.max_thermal_bridge_mm),
        spoke_gap_mm: (config.min_thermal_gap_mm, config.max_thermal_gap_mm),
        star_grounding: star_point.is_some(),
        star_point,
    }
}

fn resolve_star_point(net: &Net, nominated_pin: &str) -> Option<PinRef> {
    net.endpoints.iter().find(|e| e.pin == nominated_pin).cloned()
}

use crate::model::net::SignalClass;

/// Per-class routing rules: the table the grid router consults for minimum
/// width/clearance, a soft maximum length, a preferred layer name, layer
/// names to avoid, and whether the net needs a ground-plane reference.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoutingRule {
    pub min_width_mm: f64,
    pub min_clearance_mm: f64,
    pub max_length_mm: f64,
    pub preferred_layer: &'static str,
    pub avoid_layers: &'static [&'static str],
    pub needs_gnd_plane: bool,
}

pub const fn rule_for(class: SignalClass) -> RoutingRule {
    match class {
        SignalClass::Audio => RoutingRule {
            min_width_mm: 0.3,
            min_clearance_mm: 0.3,
            max_length_mm: 100.0,
            preferred_layer: "front",
            avoid_layers: &["back"],
            needs_gnd_plane: true,
        },
        SignalClass::Power => RoutingRule {
            min_width_mm: 0.5,
            min_clearance_mm: 0.3,
            max_length_mm: 50.0,
            preferred_layer: "inner-1",
            avoid_layers: &["front", "back"],
            needs_gnd_plane: true,
        },
        SignalClass::Ground => RoutingRule {
            min_width_mm: 0.5,
            min_clearance_mm: 0.3,
            max_length_mm: 50.0,
            preferred_layer: "inner-2",
            avoid_layers: &["front", "back"],
            needs_gnd_plane: false,
        },
        SignalClass::Control => RoutingRule {
            min_width_mm: 0.2,
            min_clearance_mm: 0.2,
            max_length_mm: 200.0,
            preferred_layer: "back",
            avoid_layers: &["front"],
            needs_gnd_plane: false,
        },
        SignalClass::Digital => RoutingRule {
            min_width_mm: 0.2,
            min_clearance_mm: 0.3,
            max_length_mm: 200.0,
            preferred_layer: "back",
            avoid_layers: &[],
            needs_gnd_plane: true,
        },
        SignalClass::HighSpeed => RoutingRule {
            min_width_mm: 0.2,
            min_clearance_mm: 0.3,
            max_length_mm: 50.0,
            preferred_layer: "front",
            avoid_layers: &[],
            needs_gnd_plane: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_prefers_front_and_needs_gnd_plane() {
        let rule = rule_for(SignalClass::Audio);
        assert_eq!(rule.preferred_layer, "front");
        assert!(rule.needs_gnd_plane);
    }

    #[test]
    fn control_is_the_narrowest_class() {
        let control = rule_for(SignalClass::Control);
        let power = rule_for(SignalClass::Power);
        assert!(control.min_width_mm < power.min_width_mm);
    }
}

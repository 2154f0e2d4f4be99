use serde::{Deserialize, Serialize};
use strum::Display;

use crate::model::component::Component;
use crate::model::ids::LayerId;
use crate::model::track::Track;
use crate::model::via::Via;
use crate::model::zone::Zone;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum LayerRole {
    Signal,
    Power,
    Ground,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub role: LayerRole,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, role: LayerRole) -> Self {
        Self { id, name: name.into(), role }
    }
}

/// A fixed jack/potentiometer/LED pitch on the front panel edge of a
/// panel-mount preset, in millimetres.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontPanelPitch {
    pub jack_mm: f64,
    pub potentiometer_mm: f64,
    pub led_mm: f64,
}

/// The board's mechanical form factor. Panel-mount presets carry a fixed
/// front-edge pitch table consulted by the placement engine's front-panel
/// rule; `Custom` has none.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoardPreset {
    Eurorack,
    Pedal,
    Desktop,
    Rack,
    Custom { width_mm: f64, height_mm: f64 },
}

impl BoardPreset {
    pub const fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            BoardPreset::Eurorack => (128.5, 128.5),
            BoardPreset::Pedal => (125.0, 60.0),
            BoardPreset::Desktop => (200.0, 150.0),
            BoardPreset::Rack => (483.0, 44.0),
            BoardPreset::Custom { width_mm, height_mm } => (*width_mm, *height_mm),
        }
    }

    /// Panel-mount presets constrain jacks/potentiometers/switches/LEDs to a
    /// board edge at a fixed pitch; `None` for non-panel-mount presets.
    pub const fn front_panel_pitch(&self) -> Option<FrontPanelPitch> {
        match self {
            BoardPreset::Eurorack => {
                Some(FrontPanelPitch { jack_mm: 3.5, potentiometer_mm: 7.5, led_mm: 5.0 })
            }
            BoardPreset::Pedal => {
                Some(FrontPanelPitch { jack_mm: 3.5, potentiometer_mm: 7.5, led_mm: 5.0 })
            }
            _ => None,
        }
    }
}

/// Design-rule defaults, overridable per-board. Distances in millimetres.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRules {
    pub edge_clearance_mm: f64,
    pub min_component_spacing_mm: f64,
    pub min_zone_clearance_mm: f64,
}

impl Default for DesignRules {
    fn default() -> Self {
        Self { edge_clearance_mm: 2.0, min_component_spacing_mm: 0.5, min_zone_clearance_mm: 0.3 }
    }
}

/// A rectangular board: layer stack, design rules, and the collections of
/// placed components, tracks, vias, and zones owned exclusively by the
/// pipeline driver while a pass is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width_mm: f64,
    pub height_mm: f64,
    pub preset: BoardPreset,
    pub layers: Vec<Layer>,
    pub design_rules: DesignRules,
    pub components: Vec<Component>,
    pub tracks: Vec<Track>,
    pub vias: Vec<Via>,
    pub zones: Vec<Zone>,
}

impl Board {
    pub fn new(preset: BoardPreset, layers: Vec<Layer>) -> Self {
        let (width_mm, height_mm) = preset.dimensions_mm();
        Self {
            width_mm,
            height_mm,
            preset,
            layers,
            design_rules: DesignRules::default(),
            components: Vec::new(),
            tracks: Vec::new(),
            vias: Vec::new(),
            zones: Vec::new(),
        }
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_named(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// True if every reference designator on the board is unique, per the
    /// board-wide uniqueness invariant.
    pub fn reference_designators_unique(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.components.iter().all(|c| seen.insert(c.reference))
    }
}

/// Builds the standard 2-layer stack: front and back copper, both signal.
pub fn two_layer_stack() -> Vec<Layer> {
    vec![
        Layer::new(LayerId(0), "front", LayerRole::Signal),
        Layer::new(LayerId(1), "back", LayerRole::Signal),
    ]
}

/// Builds the standard 4-layer stack: front signal, inner-1 power, inner-2
/// ground, back signal.
pub fn four_layer_stack() -> Vec<Layer> {
    vec![
        Layer::new(LayerId(0), "front", LayerRole::Signal),
        Layer::new(LayerId(1), "inner-1", LayerRole::Power),
        Layer::new(LayerId(2), "inner-2", LayerRole::Ground),
        Layer::new(LayerId(3), "back", LayerRole::Signal),
    ]
}

/// Builds a 6-layer stack: front/back signal, two inner signal, inner power
/// and inner ground planes.
pub fn six_layer_stack() -> Vec<Layer> {
    vec![
        Layer::new(LayerId(0), "front", LayerRole::Signal),
        Layer::new(LayerId(1), "inner-1", LayerRole::Signal),
        Layer::new(LayerId(2), "inner-2", LayerRole::Power),
        Layer::new(LayerId(3), "inner-3", LayerRole::Ground),
        Layer::new(LayerId(4), "inner-4", LayerRole::Signal),
        Layer::new(LayerId(5), "back", LayerRole::Signal),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pedal_preset_has_documented_dimensions() {
        assert_eq!(BoardPreset::Pedal.dimensions_mm(), (125.0, 60.0));
    }

    #[test]
    fn rack_preset_has_no_front_panel_pitch() {
        assert!(BoardPreset::Rack.front_panel_pitch().is_none());
    }

    #[test]
    fn four_layer_stack_has_power_and_ground_inner_layers() {
        let layers = four_layer_stack();
        assert!(layers.iter().any(|l| l.role == LayerRole::Power));
        assert!(layers.iter().any(|l| l.role == LayerRole::Ground));
    }
}

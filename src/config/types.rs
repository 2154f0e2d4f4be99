//! Configuration types deserialized from the project's `audiopcb.toml`.
use serde::Deserialize;

/// The top-level configuration parsed from `audiopcb.toml`. Loaded once at
/// startup and immutable thereafter; every numeric parameter named across
/// placement, routing, zones, and validation lives here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub design_rules: DesignRuleConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub zones: ZoneConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub refinement: RefinementConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DesignRuleConfig {
    #[serde(default = "default_edge_clearance")]
    pub edge_clearance_mm: f64,
    #[serde(default = "default_min_component_spacing")]
    pub min_component_spacing_mm: f64,
    #[serde(default = "default_min_zone_clearance")]
    pub min_zone_clearance_mm: f64,
}

impl Default for DesignRuleConfig {
    fn default() -> Self {
        Self {
            edge_clearance_mm: default_edge_clearance(),
            min_component_spacing_mm: default_min_component_spacing(),
            min_zone_clearance_mm: default_min_zone_clearance(),
        }
    }
}

fn default_edge_clearance() -> f64 {
    2.0
}
fn default_min_component_spacing() -> f64 {
    0.5
}
fn default_min_zone_clearance() -> f64 {
    0.3
}

/// Per-signal-class routing parameters, keyed by [`crate::model::net::SignalClass`]
/// in `routing::rules`. This struct carries the budget/attempt knobs that
/// apply across all classes.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_via_diameter")]
    pub via_diameter_mm: f64,
    #[serde(default = "default_via_drill")]
    pub via_drill_mm: f64,
    #[serde(default = "default_via_preference")]
    pub via_preference: f64,
    #[serde(default = "default_max_reroute_attempts")]
    pub max_reroute_attempts: u32,
    #[serde(default = "default_grid_resolution")]
    pub grid_resolution_mm: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            via_diameter_mm: default_via_diameter(),
            via_drill_mm: default_via_drill(),
            via_preference: default_via_preference(),
            max_reroute_attempts: default_max_reroute_attempts(),
            grid_resolution_mm: default_grid_resolution(),
        }
    }
}

fn default_via_diameter() -> f64 {
    0.6
}
fn default_via_drill() -> f64 {
    0.3
}
fn default_via_preference() -> f64 {
    5.0
}
fn default_max_reroute_attempts() -> u32 {
    3
}
fn default_grid_resolution() -> f64 {
    0.2
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "default_margin_percentage")]
    pub margin_percentage: f64,
    #[serde(default = "default_grid_spacing_percentage")]
    pub grid_spacing_percentage: f64,
    #[serde(default = "default_center_spacing_percentage")]
    pub center_spacing_percentage: f64,
    #[serde(default = "default_max_component_density_radius")]
    pub max_component_density_radius_mm: f64,
    #[serde(default = "default_max_nearby_components")]
    pub max_nearby_components: u32,
    #[serde(default = "default_decoupling_cap_distance")]
    pub decoupling_cap_distance_mm: f64,
    #[serde(default)]
    pub stability_components: Vec<StabilityComponent>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin_percentage: default_margin_percentage(),
            grid_spacing_percentage: default_grid_spacing_percentage(),
            center_spacing_percentage: default_center_spacing_percentage(),
            max_component_density_radius_mm: default_max_component_density_radius(),
            max_nearby_components: default_max_nearby_components(),
            decoupling_cap_distance_mm: default_decoupling_cap_distance(),
            stability_components: Vec::new(),
        }
    }
}

fn default_margin_percentage() -> f64 {
    0.10
}
fn default_grid_spacing_percentage() -> f64 {
    0.02
}
fn default_center_spacing_percentage() -> f64 {
    0.15
}
fn default_max_component_density_radius() -> f64 {
    15.0
}
fn default_max_nearby_components() -> u32 {
    4
}
fn default_decoupling_cap_distance() -> f64 {
    2.0
}

/// A component declared in configuration to be pre-placed at a fixed
/// percentage-of-board coordinate before general placement runs, so later
/// placement sees it as an obstacle (ferrite beads, EMC filters, bulk
/// decoupling capacitors, audio band-limit filters).
#[derive(Debug, Clone, Deserialize)]
pub struct StabilityComponent {
    pub reference: String,
    pub x_percentage: f64,
    pub y_percentage: f64,
}

/// Copper-pour parameters: clearance, thermal-relief spoke/gap bounds, and
/// an optional star-grounding pin nomination.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneConfig {
    #[serde(default = "default_min_thermal_bridge")]
    pub min_thermal_bridge_mm: f64,
    #[serde(default = "default_max_thermal_bridge")]
    pub max_thermal_bridge_mm: f64,
    #[serde(default = "default_min_thermal_gap")]
    pub min_thermal_gap_mm: f64,
    #[serde(default = "default_max_thermal_gap")]
    pub max_thermal_gap_mm: f64,
    #[serde(default)]
    pub star_ground_pin: Option<String>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            min_thermal_bridge_mm: default_min_thermal_bridge(),
            max_thermal_bridge_mm: default_max_thermal_bridge(),
            min_thermal_gap_mm: default_min_thermal_gap(),
            max_thermal_gap_mm: default_max_thermal_gap(),
            star_ground_pin: None,
        }
    }
}

fn default_min_thermal_bridge() -> f64 {
    0.3
}
fn default_max_thermal_bridge() -> f64 {
    0.5
}
fn default_min_thermal_gap() -> f64 {
    0.2
}
fn default_max_thermal_gap() -> f64 {
    0.4
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_max_crosstalk")]
    pub max_crosstalk: f64,
    #[serde(default = "default_max_voltage_drop")]
    pub max_voltage_drop_v: f64,
    #[serde(default = "default_max_current_density")]
    pub max_current_density_a_per_mm2: f64,
    #[serde(default)]
    pub extended_bandwidth_analysis: bool,
    #[serde(default = "default_max_frequency")]
    pub max_frequency_hz: f64,
    #[serde(default = "default_min_frequency")]
    pub min_frequency_hz: f64,
    #[serde(default = "default_frequency_tolerance_db")]
    pub frequency_tolerance_db: f64,
    #[serde(default = "default_severity_thresholds")]
    pub severity_thresholds: (f64, f64, f64),
    #[serde(default = "default_min_power_plane_coverage")]
    pub min_power_plane_coverage: f64,
    #[serde(default = "default_min_ground_plane_coverage")]
    pub min_ground_plane_coverage: f64,
    #[serde(default = "default_max_ground_loop_area")]
    pub max_ground_loop_area_mm2: f64,
    #[serde(default = "default_min_ground_connections")]
    pub min_ground_connections_per_ic: u32,
    #[serde(default = "default_max_power_ground_loop_area")]
    pub max_power_ground_loop_area_mm2: f64,
    #[serde(default = "default_max_emissions_proxy")]
    pub max_emissions_proxy: f64,
    #[serde(default = "default_max_component_temp")]
    pub max_component_temp_c: f64,
    #[serde(default = "default_min_thermal_pad_area")]
    pub min_thermal_pad_area_mm2: f64,
    #[serde(default = "default_thermal_density_radius")]
    pub thermal_density_radius_mm: f64,
    #[serde(default = "default_max_dissipating_components")]
    pub max_dissipating_components: u32,
    #[serde(default = "default_min_hole")]
    pub min_hole_mm: f64,
    #[serde(default = "default_min_pad")]
    pub min_pad_mm: f64,
    #[serde(default = "default_min_silk")]
    pub min_silk_mm: f64,
    #[serde(default = "default_min_solder_mask")]
    pub min_solder_mask_mm: f64,
    #[serde(default = "default_min_annular_ring")]
    pub min_annular_ring_mm: f64,
    #[serde(default = "default_require_test_points")]
    pub require_test_points: bool,
    #[serde(default = "default_min_fiducials")]
    pub min_fiducials: u32,
    #[serde(default)]
    pub panelized: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_crosstalk: default_max_crosstalk(),
            max_voltage_drop_v: default_max_voltage_drop(),
            max_current_density_a_per_mm2: default_max_current_density(),
            extended_bandwidth_analysis: false,
            max_frequency_hz: default_max_frequency(),
            min_frequency_hz: default_min_frequency(),
            frequency_tolerance_db: default_frequency_tolerance_db(),
            severity_thresholds: default_severity_thresholds(),
            min_power_plane_coverage: default_min_power_plane_coverage(),
            min_ground_plane_coverage: default_min_ground_plane_coverage(),
            max_ground_loop_area_mm2: default_max_ground_loop_area(),
            min_ground_connections_per_ic: default_min_ground_connections(),
            max_power_ground_loop_area_mm2: default_max_power_ground_loop_area(),
            max_emissions_proxy: default_max_emissions_proxy(),
            max_component_temp_c: default_max_component_temp(),
            min_thermal_pad_area_mm2: default_min_thermal_pad_area(),
            thermal_density_radius_mm: default_thermal_density_radius(),
            max_dissipating_components: default_max_dissipating_components(),
            min_hole_mm: default_min_hole(),
            min_pad_mm: default_min_pad(),
            min_silk_mm: default_min_silk(),
            min_solder_mask_mm: default_min_solder_mask(),
            min_annular_ring_mm: default_min_annular_ring(),
            require_test_points: default_require_test_points(),
            min_fiducials: default_min_fiducials(),
            panelized: false,
        }
    }
}

fn default_max_crosstalk() -> f64 {
    0.1
}
fn default_max_voltage_drop() -> f64 {
    0.3
}
fn default_max_current_density() -> f64 {
    2.0
}
fn default_max_frequency() -> f64 {
    20_000.0
}
fn default_min_frequency() -> f64 {
    20.0
}
fn default_frequency_tolerance_db() -> f64 {
    3.0
}
fn default_severity_thresholds() -> (f64, f64, f64) {
    (0.3, 0.7, 0.9)
}
fn default_min_power_plane_coverage() -> f64 {
    0.3
}
fn default_min_ground_plane_coverage() -> f64 {
    0.5
}
fn default_max_ground_loop_area() -> f64 {
    500.0
}
fn default_min_ground_connections() -> u32 {
    1
}
fn default_max_power_ground_loop_area() -> f64 {
    300.0
}
fn default_max_emissions_proxy() -> f64 {
    1.0
}
fn default_max_component_temp() -> f64 {
    85.0
}
fn default_min_thermal_pad_area() -> f64 {
    4.0
}
fn default_thermal_density_radius() -> f64 {
    15.0
}
fn default_max_dissipating_components() -> u32 {
    3
}
fn default_min_hole() -> f64 {
    0.2
}
fn default_min_pad() -> f64 {
    0.3
}
fn default_min_silk() -> f64 {
    0.1
}
fn default_min_solder_mask() -> f64 {
    0.05
}
fn default_min_annular_ring() -> f64 {
    0.125
}
fn default_require_test_points() -> bool {
    false
}
fn default_min_fiducials() -> u32 {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefinementConfig {
    #[serde(default = "default_refinement_budget")]
    pub refinement_budget: u32,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self { refinement_budget: default_refinement_budget() }
    }
}

fn default_refinement_budget() -> u32 {
    10
}

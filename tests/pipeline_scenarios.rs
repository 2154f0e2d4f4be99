//! End-to-end pipeline scenarios driven through the public netlist-import
//! surface, mirroring the worked examples of the pipeline's testable
//! properties: a minimal two-component circuit and an op-amp inverting
//! stage, each imported from the reference JSON shape and run to a
//! finalized board.
use audiopcb::config::Config;
use audiopcb::model::board::{two_layer_stack, BoardPreset};
use audiopcb::netlist::import::from_reference_json;
use audiopcb::registry::Registry;
use audiopcb::{Context, PipelineDriver, PipelineState};

const MINIMAL_NETLIST_JSON: &str = r#"{
    "elements": [
        {"id": "r1", "type": "resistor", "value": "10k"},
        {"id": "j1", "type": "jack", "value": "", "properties": {"connector_type": "3.5mm"}}
    ],
    "wires": [
        {"net": "IN", "endpoints": [{"component_id": "r1", "pin": "1"}, {"component_id": "j1", "pin": "TIP"}]},
        {"net": "GND", "endpoints": [{"component_id": "r1", "pin": "2"}, {"component_id": "j1", "pin": "SLEEVE"}]}
    ]
}"#;

const OPAMP_INVERTING_STAGE_JSON: &str = r#"{
    "elements": [
        {"id": "u1", "type": "opamp", "value": "TL072"},
        {"id": "r1", "type": "resistor", "value": "10k"},
        {"id": "r2", "type": "resistor", "value": "100k"},
        {"id": "c1", "type": "capacitor", "value": "100nF", "properties": {"package": "ceramic"}},
        {"id": "j_in", "type": "jack", "value": "", "properties": {"connector_type": "3.5mm"}},
        {"id": "j_out", "type": "jack", "value": "", "properties": {"connector_type": "3.5mm"}}
    ],
    "wires": [
        {"net": "IN", "endpoints": [{"component_id": "r1", "pin": "1"}, {"component_id": "j_in", "pin": "TIP"}]},
        {"net": "FB", "endpoints": [{"component_id": "r1", "pin": "2"}, {"component_id": "u1", "pin": "2"}, {"component_id": "r2", "pin": "1"}]},
        {"net": "OUT", "endpoints": [{"component_id": "u1", "pin": "1"}, {"component_id": "r2", "pin": "2"}, {"component_id": "j_out", "pin": "TIP"}]},
        {"net": "VCC", "endpoints": [{"component_id": "u1", "pin": "8"}, {"component_id": "c1", "pin": "1"}]},
        {"net": "GND", "endpoints": [{"component_id": "c1", "pin": "2"}, {"component_id": "j_in", "pin": "SLEEVE"}, {"component_id": "j_out", "pin": "SLEEVE"}]}
    ]
}"#;

#[test]
fn minimal_two_component_circuit_finalizes_on_pedal_preset() {
    let registry = Registry::new();
    let config = Config::default();
    let ctx = Context::new(&registry, &config);

    let netlist = from_reference_json(MINIMAL_NETLIST_JSON, &registry).unwrap();
    assert_eq!(netlist.components().len(), 2);

    let mut driver = PipelineDriver::new(ctx);
    let outcome = driver.run(netlist, BoardPreset::Pedal, two_layer_stack(), 0).unwrap();

    assert_eq!(outcome.state, PipelineState::Finalized);
    assert!(outcome.report.is_valid);
    assert_eq!(outcome.report.count_at_or_above(audiopcb::validation::Severity::Error), 0);
}

#[test]
fn opamp_inverting_stage_places_decoupling_cap_and_finalizes() {
    let registry = Registry::new();
    let config = Config::default();
    let ctx = Context::new(&registry, &config);

    let netlist = from_reference_json(OPAMP_INVERTING_STAGE_JSON, &registry).unwrap();
    assert_eq!(netlist.components().len(), 6);

    let mut driver = PipelineDriver::new(ctx);
    let outcome = driver.run(netlist, BoardPreset::Pedal, two_layer_stack(), 1).unwrap();

    assert_eq!(outcome.state, PipelineState::Finalized);
    assert!(outcome.report.is_valid, "expected a clean report, got {:?}", outcome.report.issues);

    let opamp = outcome.netlist.iter_components().find(|c| c.reference.prefix == "U").expect("opamp placed");
    let decoupling_cap = outcome.netlist.iter_components().find(|c| c.reference.prefix == "C").expect("decoupling cap placed");
    let power_pin = opamp.pins.values().find(|p| p.name == "V+").expect("dual op-amp has a V+ pin");
    let pin_pos = opamp.position.expect("opamp has a position").offset(power_pin.p.x, power_pin.p.y);
    let cap_pos = decoupling_cap.position.expect("decoupling cap has a position");
    let distance = cap_pos.dist(pin_pos);
    assert!(distance <= config.placement.decoupling_cap_distance_mm + 1e-6, "decoupling cap placed {distance:.2}mm from U1's V+ pin");
}

#[test]
fn placement_infeasible_reports_the_first_unplaceable_component() {
    use audiopcb::model::component::{Kind, OpampVariant};

    let registry = Registry::new();
    let config = Config::default();
    let ctx = Context::new(&registry, &config);

    let mut netlist = audiopcb::netlist::Netlist::new();
    for _ in 0..60 {
        netlist.add_component(&registry, Kind::Opamp(OpampVariant::Quad), "TL074", None).unwrap();
    }

    let mut driver = PipelineDriver::new(ctx);
    let result = driver.run(netlist, BoardPreset::Pedal, two_layer_stack(), 0);

    assert!(result.is_err());
    assert_eq!(driver.state(), PipelineState::Failed);
}

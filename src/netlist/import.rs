//! Inbound reference netlist format: a JSON document with `elements` and
//! `wires` top-level arrays. The Falstad JSON adapter named alongside this
//! format in the interface description is an external front-end parser and
//! is not implemented here; only this reference shape is accepted.
use std::collections::HashMap;

use serde::Deserialize;

use crate::model::component::{CapacitorVariant, JackVariant, Kind, OpampVariant, TransistorVariant};
use crate::model::ids::ComponentId;
use crate::netlist::error::ImportError;
use crate::netlist::graph::Netlist;
use crate::registry::Registry;

#[derive(Debug, Deserialize)]
struct ReferenceNetlistJson {
    elements: Vec<ElementJson>,
    wires: Vec<WireJson>,
}

#[derive(Debug, Deserialize)]
struct ElementJson {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    properties: PropertiesJson,
}

#[derive(Debug, Default, Deserialize)]
struct PropertiesJson {
    package: Option<String>,
    transistor_type: Option<String>,
    connector_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireJson {
    net: String,
    endpoints: Vec<EndpointJson>,
}

#[derive(Debug, Deserialize)]
struct EndpointJson {
    component_id: String,
    pin: String,
}

fn kind_from_json(kind: &str, props: &PropertiesJson) -> Option<Kind> {
    Some(match kind {
        "resistor" => Kind::Resistor,
        "capacitor" => Kind::Capacitor(match props.package.as_deref() {
            Some("film") => CapacitorVariant::Film,
            Some("tantalum") => CapacitorVariant::Tantalum,
            Some("ceramic") => CapacitorVariant::Ceramic,
            _ => CapacitorVariant::Electrolytic,
        }),
        "inductor" => Kind::Inductor,
        "diode" => Kind::Diode,
        "led" => Kind::Led,
        "transistor" => Kind::Transistor(match props.transistor_type.as_deref() {
            Some("jfet") => TransistorVariant::Jfet,
            Some("mosfet") => TransistorVariant::Mosfet,
            _ => TransistorVariant::Bjt,
        }),
        "opamp" => Kind::Opamp(match props.package.as_deref() {
            Some("quad") => OpampVariant::Quad,
            Some("single") => OpampVariant::Single,
            _ => OpampVariant::Dual,
        }),
        "ic-generic" => Kind::IcGeneric,
        "potentiometer" => Kind::Potentiometer,
        "switch" => Kind::Switch,
        "jack" => Kind::Jack(match props.connector_type.as_deref() {
            Some("6.35mm") => JackVariant::Mm635,
            Some("xlr") => JackVariant::Xlr,
            _ => JackVariant::Mm35,
        }),
        "speaker" => Kind::Speaker,
        "ferrite-bead" => Kind::FerriteBead,
        "crystal" => Kind::Crystal,
        "oscillator" => Kind::Oscillator,
        "relay" => Kind::Relay,
        "transformer" => Kind::Transformer,
        "tube" => Kind::Tube,
        "regulator" => Kind::Regulator,
        "dac" => Kind::Dac,
        "adc" => Kind::Adc,
        "vco" => Kind::Vco,
        "vcf" => Kind::Vcf,
        "vca" => Kind::Vca,
        "logic" => Kind::Logic,
        "timer" => Kind::Timer,
        "mounting-hole" => Kind::MountingHole,
        _ => return None,
    })
}

/// Parses the reference JSON shape into a [`Netlist`], resolving each
/// element's kind through `registry` as components are created.
pub fn from_reference_json(json: &str, registry: &Registry) -> Result<Netlist, ImportError> {
    let parsed: ReferenceNetlistJson = serde_json::from_str(json)?;
    let mut netlist = Netlist::new();
    let mut ids: HashMap<String, ComponentId> = HashMap::new();

    for element in &parsed.elements {
        let kind = kind_from_json(&element.kind, &element.properties)
            .ok_or_else(|| ImportError::UnknownElementType { id: element.id.clone(), kind: element.kind.clone() })?;
        let id = netlist.add_component(registry, kind, element.value.clone(), element.properties.package.as_deref())?;
        ids.insert(element.id.clone(), id);
    }

    for wire in &parsed.wires {
        let net_id = netlist.add_net(wire.net.clone(), None).or_else(|_| {
            // A wire may add a second endpoint set to an already-declared net.
            netlist
                .nets()
                .iter()
                .find(|n| n.name == wire.net)
                .map(|n| n.id)
                .ok_or_else(|| crate::netlist::error::NetlistError::DanglingReference { net: wire.net.clone() })
        })?;
        for endpoint in &wire.endpoints {
            let component_id = *ids
                .get(&endpoint.component_id)
                .ok_or_else(|| ImportError::UnknownElementRef { id: endpoint.component_id.clone() })?;
            netlist.connect(net_id, component_id, endpoint.pin.clone())?;
        }
    }

    Ok(netlist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_two_component_circuit_imports() {
        let json = r#"{
            "elements": [
                {"id": "e1", "type": "resistor", "value": "10k"},
                {"id": "e2", "type": "jack", "value": "", "properties": {"connector_type": "3.5mm"}}
            ],
            "wires": [
                {"net": "IN", "endpoints": [{"component_id": "e1", "pin": "1"}]},
                {"net": "GND", "endpoints": [{"component_id": "e2", "pin": "SLEEVE"}]}
            ]
        }"#;
        let registry = Registry::new();
        let netlist = from_reference_json(json, &registry).unwrap();
        assert_eq!(netlist.components().len(), 2);
        assert_eq!(netlist.nets().len(), 2);
    }

    #[test]
    fn unknown_element_type_is_rejected() {
        let json = r#"{"elements": [{"id": "e1", "type": "quantum-flux-capacitor", "value": ""}], "wires": []}"#;
        let registry = Registry::new();
        assert!(matches!(from_reference_json(json, &registry), Err(ImportError::UnknownElementType { .. })));
    }
}

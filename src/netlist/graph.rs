use std::collections::BTreeMap;

use crate::model::component::{Component, Kind, LayerSide, Pin};
use crate::model::ids::{ComponentId, NetId, ReferenceDesignator};
use crate::model::net::{Net, PinRef, SignalClass};
use crate::netlist::classify;
use crate::netlist::error::NetlistError;
use crate::registry::{Registry, RegistryError};

/// Normalized intermediate representation: components and nets stored in
/// flat arenas keyed by id, replacing circular component/net references.
/// Cross-references are indices, never owning pointers.
#[derive(Debug, Default)]
pub struct Netlist {
    components: Vec<Component>,
    nets: Vec<Net>,
    class_explicit: Vec<bool>,
    next_index: BTreeMap<&'static str, u32>,
}

impl Netlist {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_reference(&mut self, prefix: &'static str) -> ReferenceDesignator {
        let index = self.next_index.entry(prefix).or_insert(1);
        let reference = ReferenceDesignator::new(prefix, *index);
        *index += 1;
        reference
    }

    /// Allocates a reference designator by prefix + next free index, resolves
    /// the footprint via `registry`, and stores the component.
    pub fn add_component(
        &mut self,
        registry: &Registry,
        kind: Kind,
        value: impl Into<String>,
        package: Option<&str>,
    ) -> Result<ComponentId, RegistryError> {
        let record = registry.resolve(&kind, package)?;
        let id = ComponentId(self.components.len() as u32);
        let reference = self.next_reference(record.reference_prefix);
        let pin_count = record.pin_map.len();
        let pins = record
            .pin_map
            .iter()
            .map(|(&number, name)| {
                (number, Pin { number, name: name.clone(), p: crate::registry::data::pin_offset(&record.footprint_id, number, pin_count) })
            })
            .collect();
        self.components.push(Component {
            id,
            kind,
            value: value.into(),
            package: package.map(str::to_owned),
            footprint_id: record.footprint_id,
            pins,
            reference,
            position: None,
            rotation_deg: record.default_rotation_deg,
            layer_side: LayerSide::Top,
        });
        Ok(id)
    }

    /// Rejects duplicate net names. `class` of `None` defers classification
    /// to the heuristic in [`classify::classify`], re-evaluated as
    /// connections with known audio-kind pins are added.
    pub fn add_net(&mut self, name: impl Into<String>, class: Option<SignalClass>) -> Result<NetId, NetlistError> {
        let name = name.into();
        if self.nets.iter().any(|n| n.name == name) {
            return Err(NetlistError::DuplicateNet { name });
        }
        let id = NetId(self.nets.len() as u32);
        let explicit = class.is_some();
        let resolved_class = class.unwrap_or_else(|| classify::classify(&name, false));
        self.nets.push(Net::new(id, name, resolved_class));
        self.class_explicit.push(explicit);
        Ok(id)
    }

    /// Validates the pin exists via the registry-derived pin map already
    /// attached to the component, then appends the endpoint. Re-runs
    /// classification if the net's class was not explicitly supplied and
    /// this endpoint touches an audio-kind pin.
    pub fn connect(&mut self, net_id: NetId, component_id: ComponentId, pin: impl Into<String>) -> Result<(), NetlistError> {
        let pin = pin.into();
        let component = self
            .components
            .get(component_id.0 as usize)
            .ok_or_else(|| NetlistError::UnknownPin { component: component_id, pin: pin.clone() })?;
        if component.pin_named(&pin).is_none() && component.pins.get(&pin.parse::<u32>().unwrap_or(u32::MAX)).is_none() {
            return Err(NetlistError::UnknownPin { component: component_id, pin });
        }
        let is_audio = component.kind.is_audio();
        let net_idx = net_id.0 as usize;
        let net = self
            .nets
            .get_mut(net_idx)
            .ok_or_else(|| NetlistError::DanglingReference { net: net_id.to_string() })?;
        net.endpoints.push(PinRef::new(component_id, pin));
        if is_audio && !self.class_explicit[net_idx] && net.signal_class == SignalClass::Control {
            net.signal_class = SignalClass::Audio;
            net.target_impedance = SignalClass::Audio.default_target_impedance();
        }
        Ok(())
    }

    /// A finite, restartable sequence over the nets in insertion order.
    pub fn iter_nets(&self) -> impl Iterator<Item = &Net> + '_ {
        self.nets.iter()
    }

    pub fn iter_components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0 as usize)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id.0 as usize)
    }

    pub fn net(&self, id: NetId) -> Option<&Net> {
        self.nets.get(id.0 as usize)
    }

    pub fn net_mut(&mut self, id: NetId) -> Option<&mut Net> {
        self.nets.get_mut(id.0 as usize)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::component::CapacitorVariant;

    #[test]
    fn duplicate_net_name_is_rejected() {
        let mut nl = Netlist::new();
        nl.add_net("IN", None).unwrap();
        assert!(matches!(nl.add_net("IN", None), Err(NetlistError::DuplicateNet { .. })));
    }

    #[test]
    fn reference_designators_increment_per_prefix() {
        let registry = Registry::new();
        let mut nl = Netlist::new();
        let r1 = nl.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        let r2 = nl.add_component(&registry, Kind::Resistor, "100k", None).unwrap();
        let c1 = nl.add_component(&registry, Kind::Capacitor(CapacitorVariant::Ceramic), "100nF", None).unwrap();
        assert_eq!(nl.component(r1).unwrap().reference.to_string(), "R1");
        assert_eq!(nl.component(r2).unwrap().reference.to_string(), "R2");
        assert_eq!(nl.component(c1).unwrap().reference.to_string(), "C1");
    }

    #[test]
    fn connecting_unknown_pin_fails() {
        let registry = Registry::new();
        let mut nl = Netlist::new();
        let r1 = nl.add_component(&registry, Kind::Resistor, "10k", None).unwrap();
        let net = nl.add_net("IN", None).unwrap();
        assert!(matches!(nl.connect(net, r1, "99"), Err(NetlistError::UnknownPin { .. })));
    }

    #[test]
    fn audio_pin_connection_upgrades_control_net_to_audio() {
        let registry = Registry::new();
        let mut nl = Netlist::new();
        let u1 = nl.add_component(&registry, Kind::Opamp(crate::model::component::OpampVariant::Dual), "TL072", None).unwrap();
        let net = nl.add_net("N1", None).unwrap();
        nl.connect(net, u1, "OUT1").unwrap();
        assert_eq!(nl.net(net).unwrap().signal_class, SignalClass::Audio);
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::ids::{ComponentId, NetId};

/// The role-based category of a net, governing its routing rules per the
/// per-class table in the routing engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SignalClass {
    Audio,
    Power,
    Ground,
    Control,
    Digital,
    HighSpeed,
}

impl SignalClass {
    /// Default target impedance for this class, in ohms, where one applies.
    pub const fn default_target_impedance(&self) -> Option<f64> {
        match self {
            SignalClass::Audio => Some(600.0),
            SignalClass::HighSpeed => Some(50.0),
            _ => None,
        }
    }

    /// Priority used for net routing order: lower routes first.
    pub const fn routing_priority(&self) -> u8 {
        match self {
            SignalClass::Power => 0,
            SignalClass::Ground => 1,
            SignalClass::Audio => 2,
            SignalClass::HighSpeed => 3,
            SignalClass::Digital => 4,
            SignalClass::Control => 5,
        }
    }
}

/// One endpoint of a net: a component pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRef {
    pub component: ComponentId,
    pub pin: String,
}

impl PinRef {
    pub fn new(component: ComponentId, pin: impl Into<String>) -> Self {
        Self { component, pin: pin.into() }
    }
}

/// A net: an electrically common connection between one or more pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub id: NetId,
    pub name: String,
    pub signal_class: SignalClass,
    pub endpoints: Vec<PinRef>,
    pub target_impedance: Option<f64>,
    pub max_length_mm: Option<f64>,
    pub max_parallel_length_mm: Option<f64>,
}

impl Net {
    pub fn new(id: NetId, name: impl Into<String>, signal_class: SignalClass) -> Self {
        let target_impedance = signal_class.default_target_impedance();
        Self {
            id,
            name: name.into(),
            signal_class,
            endpoints: Vec::new(),
            target_impedance,
            max_length_mm: None,
            max_parallel_length_mm: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_net_defaults_to_600_ohms() {
        let n = Net::new(NetId(0), "IN", SignalClass::Audio);
        assert_eq!(n.target_impedance, Some(600.0));
    }

    #[test]
    fn power_routes_before_control() {
        assert!(SignalClass::Power.routing_priority() < SignalClass::Control.routing_priority());
    }
}

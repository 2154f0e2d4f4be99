use std::fmt;

use serde::{Deserialize, Serialize};

/// Index into a [`crate::netlist::Netlist`]'s component arena.
///
/// Components and nets used to reference each other by owning pointers; they
/// are now flat arenas keyed by these ids so cross-references are plain
/// indices instead of circular structures.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

/// Index into a [`crate::netlist::Netlist`]'s net arena.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct NetId(pub u32);

/// Index into a [`crate::model::board::Board`]'s layer stack.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct LayerId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net#{}", self.0)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// A human-facing designator like `R14` or `U3`, assigned by the netlist from
/// a per-kind prefix and a monotonically increasing index.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct ReferenceDesignator {
    pub prefix: &'static str,
    pub index: u32,
}

impl ReferenceDesignator {
    pub const fn new(prefix: &'static str, index: u32) -> Self {
        Self { prefix, index }
    }
}

impl fmt::Display for ReferenceDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_designator_displays_prefix_and_index() {
        let r = ReferenceDesignator::new("R", 14);
        assert_eq!(r.to_string(), "R14");
    }
}

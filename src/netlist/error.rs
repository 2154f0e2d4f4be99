use thiserror::Error;

use crate::model::ids::ComponentId;

#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("duplicate net name '{name}' (doc ref: netlist.duplicate-net)")]
    DuplicateNet { name: String },
    #[error("duplicate component id {id} (doc ref: netlist.duplicate-component)")]
    DuplicateComponent { id: ComponentId },
    #[error("component {component} has no pin '{pin}' (doc ref: netlist.unknown-pin)")]
    UnknownPin { component: ComponentId, pin: String },
    #[error("net '{net}' references a component or pin that does not exist (doc ref: netlist.dangling-reference)")]
    DanglingReference { net: String },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed reference netlist JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("element '{id}' has unrecognized type '{kind}' (doc ref: netlist.import.unknown-type)")]
    UnknownElementType { id: String, kind: String },
    #[error("wire references unknown element id '{id}' (doc ref: netlist.import.unknown-ref)")]
    UnknownElementRef { id: String },
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),
    #[error(transparent)]
    Netlist(#[from] NetlistError),
}

use thiserror::Error;

use crate::model::component::Kind;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown component kind '{kind}' (doc ref: registry.unknown-kind)")]
    UnknownKind { kind: &'static str },
    #[error("kind '{kind}' has no '{package}' package variant (doc ref: registry.unknown-package)")]
    UnknownPackage { kind: &'static str, package: String },
}

impl RegistryError {
    pub fn unknown_kind(kind: &Kind) -> Self {
        Self::UnknownKind { kind: kind.name() }
    }

    pub fn unknown_package(kind: &Kind, package: impl Into<String>) -> Self {
        Self::UnknownPackage { kind: kind.name(), package: package.into() }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend failed to persist board to '{path}': {source} (doc ref: backend.persist-failed)")]
    Persist { path: String, #[source] source: std::io::Error },
    #[error("board has no layer named '{layer}' (doc ref: backend.unknown-layer)")]
    UnknownLayer { layer: String },
}

//! Hierarchical TOML configuration, loaded once at startup.
pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::Config;

use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::types::Config;

/// Loads and validates `audiopcb.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<Config, ConfigError> {
    let config_path = project_dir.join("audiopcb.toml");
    let content = std::fs::read_to_string(config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration from a string. Useful for testing
/// without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.design_rules.edge_clearance_mm < 0.0 {
        return Err(ConfigError::Invalid {
            field: "design_rules.edge_clearance_mm".into(),
            reason: "must be non-negative".into(),
        });
    }
    if config.refinement.refinement_budget == 0 {
        return Err(ConfigError::Invalid {
            field: "refinement.refinement_budget".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

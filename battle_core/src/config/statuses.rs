//! Status catalog configuration loading

use super::ConfigError;
use crate::status::{StatusCatalog, StatusTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for status templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusesConfig {
    pub statuses: Vec<StatusTemplate>,
}

/// Load a status catalog from a TOML file
pub fn load_status_catalog(path: &Path) -> Result<StatusCatalog, ConfigError> {
    let config: StatusesConfig = super::load_toml(path)?;
    build_catalog(config)
}

/// Load a status catalog from a TOML string
pub fn parse_status_catalog(content: &str) -> Result<StatusCatalog, ConfigError> {
    let config: StatusesConfig = super::parse_toml(content)?;
    build_catalog(config)
}

/// Get the bundled status catalog
pub fn default_status_catalog() -> StatusCatalog {
    let toml = include_str!("../../config/statuses.toml");
    parse_status_catalog(toml).unwrap_or_else(|error| {
        tracing::warn!(%error, "bundled status catalog failed to load");
        StatusCatalog::new()
    })
}

fn build_catalog(config: StatusesConfig) -> Result<StatusCatalog, ConfigError> {
    let mut seen = HashSet::new();
    let mut catalog = StatusCatalog::new();
    for template in config.statuses {
        if !seen.insert(template.kind) {
            return Err(ConfigError::ValidationError(format!(
                "status {} is defined more than once",
                template.kind
            )));
        }
        catalog.register(template);
    }
    Ok(catalog)
}

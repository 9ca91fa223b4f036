//! Engine configuration.

use crate::resources::ResourceKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed or named an unknown resource type
    #[error("Configuration parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// No resource type is enabled
    #[error("Configuration enables no resource types")]
    NoResourceTypes,
}

/// Startup settings for the engine.
///
/// Every field has a default, so `{}` is a valid configuration.
///
/// # Example
///
/// ```rust
/// use cloudconnect::config::EngineConfig;
/// use cloudconnect::resources::ResourceKind;
///
/// let config = EngineConfig::from_json(r#"{ "resourceTypes": ["CacheDB"] }"#).unwrap();
/// assert_eq!(config.resource_types, vec![ResourceKind::CacheDb]);
/// assert!(config.include_config_in_logs);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Types the factory may build, in listing order
    pub resource_types: Vec<ResourceKind>,
    /// Whether log records carry the config summary
    pub include_config_in_logs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resource_types: ResourceKind::ALL.to_vec(),
            include_config_in_logs: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource_types.is_empty() {
            return Err(ConfigError::NoResourceTypes);
        }
        Ok(())
    }
}

//! Configuration types for LogicEngine

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use xlform_compiler::ValidationOptions;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Checks run by form validation
    pub validation: ValidationOptions,

    /// Verify the round trip on every single-expression compile, not only
    /// during form validation
    pub strict_round_trip: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            validation: ValidationOptions::default(),
            strict_round_trip: false,
        }
    }

    /// Set validation options
    pub fn with_validation(mut self, validation: ValidationOptions) -> Self {
        self.validation = validation;
        self
    }

    /// Enable strict round trips
    pub fn strict_round_trip(mut self, enable: bool) -> Self {
        self.strict_round_trip = enable;
        self
    }

    /// Load configuration from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Load configuration from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Load configuration from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(SdkError::ConfigError(format!(
                "Unsupported config file extension: {}",
                path.display()
            ))),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! Builder pattern for LogicEngine

use crate::config::EngineConfig;
use crate::engine::LogicEngine;
use crate::error::Result;
use std::path::PathBuf;
use xlform_compiler::ValidationOptions;

/// Builder for LogicEngine
///
/// # Example
///
/// ```rust
/// use xlform_sdk::LogicEngineBuilder;
///
/// let engine = LogicEngineBuilder::new()
///     .check_references(false)
///     .strict_round_trip(true)
///     .build()
///     .unwrap();
///
/// let expr = engine.compile("${age} > 18").unwrap();
/// assert_eq!(engine.to_expression(&expr), "${age} > 18");
/// ```
#[derive(Debug, Default)]
pub struct LogicEngineBuilder {
    config: EngineConfig,
    config_file: Option<PathBuf>,
}

impl LogicEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file at build time
    ///
    /// Settings in the file replace anything set on the builder.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set validation options
    pub fn with_validation(mut self, validation: ValidationOptions) -> Self {
        self.config.validation = validation;
        self
    }

    /// Report references to unknown questions
    pub fn check_references(mut self, enable: bool) -> Self {
        self.config.validation.check_references = enable;
        self
    }

    /// Report duplicate question names
    pub fn check_duplicate_names(mut self, enable: bool) -> Self {
        self.config.validation.check_duplicate_names = enable;
        self
    }

    /// Stop form validation at the first error
    pub fn fail_fast(mut self, enable: bool) -> Self {
        self.config.validation.fail_fast = enable;
        self
    }

    /// Verify round trips on every compile
    pub fn strict_round_trip(mut self, enable: bool) -> Self {
        self.config.strict_round_trip = enable;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<LogicEngine> {
        let config = match self.config_file {
            Some(path) => {
                tracing::info!("Loading engine config from {}", path.display());
                EngineConfig::from_file(&path)?
            }
            None => self.config,
        };

        LogicEngine::new(config)
    }
}

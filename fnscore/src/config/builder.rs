//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::scoring::ScoreMode;
use std::path::Path;

/// Builder for creating FnScoreConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: FnScoreConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: FnScoreConfig::default(),
        }
    }

    /// Set the number of samples taken across the variable range.
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.config.simulation.point_count = point_count;
        self
    }

    /// Set the default score mode.
    pub fn with_score_mode(mut self, score_mode: ScoreMode) -> Self {
        self.config.simulation.score_mode = score_mode;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable logging to stdout.
    pub fn with_stdout_logging(mut self, enabled: bool) -> Self {
        self.config.logging.stdout = enabled;
        self
    }

    /// Debug-level, human-readable logging.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Small, fast simulations with quiet logging, for automated tests.
    pub fn testing() -> Self {
        Self::new()
            .with_point_count(11)
            .with_log_level(LogLevel::Warn)
            .with_log_format(LogFormat::Compact)
    }

    /// Info-level JSON logging.
    pub fn production() -> Self {
        Self::new()
            .with_log_level(LogLevel::Info)
            .with_log_format(LogFormat::Json)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<FnScoreConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

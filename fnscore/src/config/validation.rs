//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &FnScoreConfig) -> Result<(), ConfigError> {
    validate_simulation_config(&config.simulation)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate simulation defaults.
pub(crate) fn validate_simulation_config(config: &SimulationConfig) -> Result<(), ConfigError> {
    if config.point_count == 0 {
        return Err(ConfigError::ValidationError(
            "point_count must be at least 1".to_string(),
        ));
    }

    if config.point_count == 1 {
        tracing::warn!(
            "point_count is 1; the sampling step divides by zero and the single point has no position"
        );
    }

    Ok(())
}

/// Validate logging configuration.
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if let Some(file) = &config.file {
        if file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Log file path cannot be empty".to_string(),
            ));
        }
    }

    if !config.stdout && config.file.is_none() {
        tracing::warn!("logging has neither stdout nor a file sink; all log output is discarded");
    }

    Ok(())
}

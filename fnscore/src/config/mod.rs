//! Configuration system for fnscore.
//!
//! Configuration is layered: built-in defaults, then an optional file, then
//! environment variables, with validation applied to the merged result.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "fnscore.toml",
    "fnscore.yaml",
    "fnscore.yml",
    "fnscore.json",
    ".fnscore/config.toml",
    ".fnscore/config.yaml",
    ".fnscore/config.yml",
    ".fnscore/config.json",
];

/// Environment variable prefix for fnscore configuration
pub const ENV_PREFIX: &str = "FNSCORE_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

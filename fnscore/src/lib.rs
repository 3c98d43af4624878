//! # fnscore
//!
//! Simulator for Elasticsearch `function_score` functions. Given a list of
//! function definitions and a field to vary, fnscore samples every function
//! across the field's range and reports the per-function and combined scores,
//! so the shape of a scoring setup can be inspected before it reaches a
//! cluster.
//!
//! ## Quick Start
//!
//! ```rust
//! use fnscore::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let result = Simulation::builder()
//!         .functions_json(
//!             r#"[
//!                 {"field_value_factor": {"field": "popularity", "factor": 1.2, "modifier": "log1p"}, "weight": 2},
//!                 {"gauss": {"popularity": {"origin": 50, "scale": 20}}}
//!             ]"#,
//!         )?
//!         .variable(SimulationVariable::numeric("popularity", 0.0, 100.0))
//!         .score_mode(ScoreMode::Multiply)
//!         .point_count(21)
//!         .build()?
//!         .run();
//!
//!     assert_eq!(result.points.len(), 21);
//!     assert_eq!(result.function_count, 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **util**: duration strings and date/timestamp conversion
//! - **scoring**: function evaluators, score modes and the data point generator
//! - **models**: simulation variable and data point types
//! - **presets**: ready-made example function lists
//! - **config** / **logging**: layered configuration and tracing setup

pub mod config;
pub mod logging;
pub mod models;
pub mod presets;
pub mod scoring;
pub mod simple;
pub mod util;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::simple::{Simulation, SimulationBuilder, SimulationResult};

    pub use crate::{init, init_with_defaults};

    pub use crate::config::{
        ConfigBuilder, ConfigLoader, FnScoreConfig, LogFormat, LogLevel, SimulationConfig,
    };

    pub use crate::models::{DataPoint, DataType, ScalarValue, SimulationVariable};

    pub use crate::scoring::{
        DecayFunction, DecayKind, FieldValueFactorFunction, FunctionDefinition, Modifier,
        ScoreMode, calculate_function_score, generate_data_points, parse_functions,
    };

    pub use crate::presets::Preset;

    pub use crate::util::{date_to_timestamp, parse_duration_str, timestamp_to_date};

    pub use crate::{FnScoreError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for fnscore operations
///
/// Evaluation itself never fails; these errors come from the boundaries
/// where text is turned into typed values, and from configuration.
#[derive(Debug, thiserror::Error)]
pub enum FnScoreError {
    /// Function list is not valid JSON or not a JSON array
    #[error("Invalid functions JSON: {0}")]
    InvalidFunctions(String),

    /// Simulation variable bounds cannot be resolved
    #[error("Invalid simulation variable: {0}")]
    InvalidVariable(String),

    /// Date string is not an ISO-8601 date or date-time
    #[error("Invalid date '{0}'. Use an ISO-8601 date such as 2024-06-01 or 2024-06-01T12:00:00Z")]
    InvalidDate(String),

    /// Timestamp is outside the representable date range
    #[error("Timestamp {0} is outside the supported date range")]
    InvalidTimestamp(i64),

    /// Unknown preset name
    #[error("Unknown preset '{0}'. Run the presets command to list available presets")]
    UnknownPreset(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for FnScoreError {
    fn from(err: crate::config::ConfigError) -> Self {
        FnScoreError::Configuration(err.to_string())
    }
}

/// Result type for fnscore operations
pub type Result<T> = std::result::Result<T, FnScoreError>;

/// Load the layered configuration and initialise logging from it.
///
/// Configuration comes from the default file locations and `FNSCORE_`
/// environment variables on top of built-in defaults.
pub fn init_with_defaults() -> Result<config::FnScoreConfig> {
    let config = config::ConfigLoader::load(None)?;
    init(config)
}

/// Initialise logging from `config` and hand the configuration back.
///
/// ```rust
/// use fnscore::prelude::*;
///
/// let config = ConfigBuilder::testing().build().unwrap();
/// let config = init(config).unwrap();
/// assert_eq!(config.simulation.point_count, 11);
/// ```
pub fn init(config: config::FnScoreConfig) -> Result<config::FnScoreConfig> {
    logging::init(&config.logging)?;
    Ok(config)
}

use crate::output::OutputFormat;
use fnscore::config::{ConfigLoader, FnScoreConfig, LogLevel, LoggingConfig};
use std::path::Path;

/// State shared by every command: the loaded configuration and the
/// selected output format.
pub struct FnScoreCliContext {
    pub config: FnScoreConfig,
    pub output: OutputFormat,
}

impl FnScoreCliContext {
    /// Load configuration from `config_path`, or from the default locations
    /// when none is given, with `FNSCORE_` environment overrides on top.
    pub fn new(config_path: Option<&Path>, output: OutputFormat) -> fnscore::Result<Self> {
        let config = ConfigLoader::load(config_path)?;
        Ok(Self { config, output })
    }

    pub fn with_config(config: FnScoreConfig, output: OutputFormat) -> Self {
        Self { config, output }
    }

    /// The `[logging]` section of the configuration, with the level replaced
    /// by `level_override` when the command line asked for one.
    pub fn logging_config(&self, level_override: Option<LogLevel>) -> LoggingConfig {
        let mut logging = self.config.logging.clone();
        if let Some(level) = level_override {
            logging.level = level;
        }
        logging
    }

    /// Install the global subscriber. Console output goes to stderr so that
    /// stdout only carries command results.
    pub fn init_logging(&self, level_override: Option<LogLevel>) -> fnscore::Result<()> {
        fnscore::logging::init_with_console(&self.logging_config(level_override), std::io::stderr)?;
        tracing::debug!(
            point_count = self.config.simulation.point_count,
            score_mode = %self.config.simulation.score_mode,
            "configuration loaded"
        );
        Ok(())
    }
}

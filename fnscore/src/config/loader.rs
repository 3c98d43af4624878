//! Configuration loader.
//!
//! Merges defaults, configuration files and `FNSCORE_` environment variables.

use super::{ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, Result, models::*, validation};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// Configuration loader that handles loading from multiple sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Create a new configuration loader with default values.
    pub fn new() -> Self {
        let figment = Figment::new().merge(Serialized::defaults(FnScoreConfig::default()));
        Self { figment }
    }

    /// Load configuration from a file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        if !matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("toml" | "yaml" | "yml" | "json")
        ) {
            return Err(ConfigError::FileLoadError(format!(
                "Unsupported file format: {}",
                path.display()
            )));
        }

        let figment = std::mem::take(&mut self.figment);
        self.figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
            _ => figment.merge(Json::file(path)),
        };

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(self)
    }

    /// Attempt to load from default configuration file locations.
    ///
    /// The first file found in the working directory wins; otherwise the
    /// platform config directory is searched.
    pub fn load_default_files(&mut self) -> &mut Self {
        for file in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(file);
            if path.exists() && self.load_file(&path).is_ok() {
                return self;
            }
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("org", "fnscore", "fnscore") {
            let config_dir = proj_dirs.config_dir();

            for ext in &["toml", "yaml", "yml", "json"] {
                let path = config_dir.join(format!("config.{}", ext));
                if path.exists() && self.load_file(&path).is_ok() {
                    break;
                }
            }
        }

        self
    }

    /// Load configuration from environment variables.
    ///
    /// Nested keys are separated by a double underscore, e.g.
    /// `FNSCORE_SIMULATION__POINT_COUNT=250`.
    pub fn load_env(&mut self) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(Env::prefixed(ENV_PREFIX).split("__"));
        self.figment = figment;
        self
    }

    /// Load configuration from a custom source.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        self
    }

    /// Extract and validate the configuration.
    pub fn extract(&self) -> Result<FnScoreConfig> {
        let config: FnScoreConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;

        Ok(config)
    }

    /// Load the full layered configuration: defaults, then `path` (or the
    /// default file locations when `None`), then the environment.
    pub fn load(path: Option<&Path>) -> Result<FnScoreConfig> {
        let mut loader = Self::new();
        match path {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                loader.load_default_files();
            }
        }
        loader.load_env().extract()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

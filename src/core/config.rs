//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::pipeline::DEFAULT_HORIZON_FH;
use crate::core::reliability::SortOrder;

/// Project config file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "maintwatch.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// MaintWatch configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forecast horizon in fleet flight hours
    pub fleet_hours_horizon: Option<f64>,

    /// Component master CSV used for code enrichment
    pub reference: Option<PathBuf>,

    /// Default number of rows shown in reliability tables
    pub top: Option<usize>,

    /// Extra `chrono` formats for removal dates (e.g. `%d/%m/%Y`)
    pub date_formats: Option<Vec<String>>,

    /// Default output format
    pub default_format: Option<String>,

    /// Default table order
    pub order: Option<SortOrder>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order.
    ///
    /// `explicit` replaces the project file lookup; unlike the implicit
    /// files, an unreadable explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/maintwatch/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match Self::from_file(&global_path) {
                    Ok(global) => config.merge(global),
                    Err(e) => warn!("ignoring global config: {}", e),
                }
            }
        }

        // 3. Project config (./maintwatch.yaml) or --config
        match explicit {
            Some(path) => config.merge(Self::from_file(path)?),
            None => {
                let project_path = Path::new(PROJECT_CONFIG_FILE);
                if project_path.exists() {
                    match Self::from_file(project_path) {
                        Ok(project) => config.merge(project),
                        Err(e) => warn!("ignoring project config: {}", e),
                    }
                }
            }
        }

        // 4. Environment variables
        config.apply_env(|var| std::env::var(var).ok())?;

        debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Parse a single YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "maintwatch")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply `MAINTWATCH_*` overrides using the given variable lookup
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = lookup("MAINTWATCH_HORIZON") {
            let horizon = value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnv {
                var: "MAINTWATCH_HORIZON",
                value: value.clone(),
            })?;
            self.fleet_hours_horizon = Some(horizon);
        }
        if let Some(value) = lookup("MAINTWATCH_REFERENCE") {
            self.reference = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("MAINTWATCH_TOP") {
            let top = value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnv {
                var: "MAINTWATCH_TOP",
                value: value.clone(),
            })?;
            self.top = Some(top);
        }
        Ok(())
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.fleet_hours_horizon.is_some() {
            self.fleet_hours_horizon = other.fleet_hours_horizon;
        }
        if other.reference.is_some() {
            self.reference = other.reference;
        }
        if other.top.is_some() {
            self.top = other.top;
        }
        if other.date_formats.is_some() {
            self.date_formats = other.date_formats;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.order.is_some() {
            self.order = other.order;
        }
    }

    /// Forecast horizon, falling back to the built-in default
    pub fn horizon(&self) -> f64 {
        self.fleet_hours_horizon.unwrap_or(DEFAULT_HORIZON_FH)
    }

    pub fn order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    pub fn date_formats(&self) -> Vec<String> {
        self.date_formats.clone().unwrap_or_default()
    }
}

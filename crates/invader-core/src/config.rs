//! Configuration loading and typed config structures for the Invader Sim simulation.
//!
//! The optional configuration file `invader-config.yaml` mirrors these
//! structs. Every field has a default, so an empty or partial file is
//! valid. Command-line flags override whatever the file says.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Where the map comes from.
    #[serde(default)]
    pub map: MapConfig,

    /// Alien population, step budget, and randomness.
    #[serde(default)]
    pub invasion: InvasionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Map source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Path to the map text file.
    #[serde(default = "default_map_path")]
    pub path: PathBuf,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: default_map_path(),
        }
    }
}

/// Invasion parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvasionConfig {
    /// Number of aliens dropped onto the map.
    #[serde(default = "default_aliens")]
    pub aliens: u64,

    /// Maximum number of steps, the scatter counting as step 1.
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// Seed for the run's random generator. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for InvasionConfig {
    fn default() -> Self {
        Self {
            aliens: default_aliens(),
            steps: default_steps(),
            seed: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_map_path() -> PathBuf {
    PathBuf::from("map.txt")
}

const fn default_aliens() -> u64 {
    10
}

const fn default_steps() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_owned()
}

//! CLI configuration.
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! none at all) is valid:
//!
//! ```toml
//! state_dir = "./vigil-state"
//!
//! [status]
//! default_period_hours = 24
//! overlap = "sum"
//!
//! [log]
//! filter = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vigil_status::{DEFAULT_PERIOD_HOURS, MAX_PERIOD_HOURS, OverlapPolicy, is_valid_period_hours};

use crate::error::CliError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "vigil.toml";

/// Default store location.
pub const DEFAULT_STATE_DIR: &str = "./vigil-state";

/// Status page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatusConfig {
    /// Window used when `--period-hours` is missing, unparseable or out of range.
    pub default_period_hours: i64,
    /// How overlapping incidents on one service are counted.
    pub overlap: OverlapPolicy,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            default_period_hours: DEFAULT_PERIOD_HOURS,
            overlap: OverlapPolicy::Sum,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Main CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VigilConfig {
    /// Directory holding the store snapshot.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Status page settings.
    #[serde(default)]
    pub status: StatusConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_DIR)
}

impl Default for VigilConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            status: StatusConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl VigilConfig {
    /// Loads the configuration for a CLI run.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used if present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CliError::config(format!(
                "failed to read config file '{}': {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        let config: Self =
            toml::from_str(content).map_err(|e| CliError::config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.state_dir.as_os_str().is_empty() {
            return Err(CliError::config("state_dir cannot be empty"));
        }

        if !is_valid_period_hours(self.status.default_period_hours) {
            return Err(CliError::config(format!(
                "status.default_period_hours must be between 1 and {MAX_PERIOD_HOURS}"
            )));
        }

        if self.log.filter.trim().is_empty() {
            return Err(CliError::config("log.filter cannot be empty"));
        }

        Ok(())
    }

    /// Overrides the state directory when `state_dir` is given.
    #[must_use]
    pub fn with_state_dir(mut self, state_dir: Option<PathBuf>) -> Self {
        if let Some(state_dir) = state_dir {
            self.state_dir = state_dir;
        }
        self
    }
}

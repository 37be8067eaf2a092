//! Command-line argument parsing with clap.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vigil_types::{AlertRequest, AlertSeverity};

use crate::error::CliError;

/// Vigil - alert triage, incident response and service availability.
#[derive(Parser, Debug, Clone)]
#[command(name = "vigil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, env = "VIGIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the store snapshot; overrides the config file.
    #[arg(long, env = "VIGIL_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, env = "VIGIL_FORMAT", default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Submit and inspect alerts.
    Alert {
        /// Alert subcommand to execute.
        #[command(subcommand)]
        command: AlertCommands,
    },

    /// Inspect and update incidents.
    Incident {
        /// Incident subcommand to execute.
        #[command(subcommand)]
        command: IncidentCommands,
    },

    /// Inspect and register services.
    Service {
        /// Service subcommand to execute.
        #[command(subcommand)]
        command: ServiceCommands,
    },

    /// Review an alert without storing anything.
    Triage(AlertInput),

    /// Show the public status page.
    Status(StatusArgs),
}

/// Alert subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AlertCommands {
    /// Store, triage and, if needed, escalate an alert.
    Create(AlertInput),

    /// List stored alerts.
    List,
}

/// Incident subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum IncidentCommands {
    /// List incidents.
    List,

    /// Mark an incident resolved.
    Resolve {
        /// Incident id (`inc-000003` or `3`).
        id: String,
    },

    /// Set an incident's status.
    Status {
        /// Incident id (`inc-000003` or `3`).
        id: String,

        /// New status, e.g. `identified` or `monitoring`.
        status: String,
    },
}

/// Service subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ServiceCommands {
    /// List services.
    List,

    /// Register a service if it does not exist yet.
    Ensure {
        /// Service name.
        name: String,
    },
}

/// An alert given either as a JSON file or as flags.
#[derive(Args, Debug, Clone)]
pub struct AlertInput {
    /// JSON file holding the alert body.
    #[arg(long, conflicts_with_all = ["title", "description", "source", "labels"])]
    pub file: Option<PathBuf>,

    /// Alert title.
    #[arg(short, long, required_unless_present = "file")]
    pub title: Option<String>,

    /// Alert description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Alert severity: info, warning or critical.
    #[arg(short, long, default_value = "info")]
    pub severity: AlertSeverity,

    /// Alert source; defaults to grafana.
    #[arg(long)]
    pub source: Option<String>,

    /// Labels (KEY=VALUE), repeatable.
    #[arg(short, long = "label", value_name = "KEY=VALUE")]
    pub labels: Vec<String>,
}

impl AlertInput {
    /// Builds the request body, reading the JSON file if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a label is
    /// not `KEY=VALUE`.
    pub fn to_request(&self) -> Result<AlertRequest, CliError> {
        if let Some(path) = &self.file {
            let content = std::fs::read_to_string(path)?;
            return serde_json::from_str(&content).map_err(|source| CliError::AlertFile {
                path: path.clone(),
                source,
            });
        }

        Ok(AlertRequest {
            source: self.source.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            severity: self.severity,
            labels: parse_labels(&self.labels)?,
            ..AlertRequest::default()
        })
    }
}

fn parse_labels(raw: &[String]) -> Result<HashMap<String, String>, CliError> {
    raw.iter()
        .map(|label| {
            label
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!("label '{label}' is not KEY=VALUE"))
                })
        })
        .collect()
}

/// Arguments for the status command.
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Reporting window in hours (1-720); out-of-range or unparseable values
    /// use the default.
    #[arg(long, allow_hyphen_values = true)]
    pub period_hours: Option<String>,
}

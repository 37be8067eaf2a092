//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use vigil_incidents::OrchestratorError;
use vigil_store::StoreError;
use vigil_types::ParseError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or unreadable configuration.
    #[error("configuration error: {reason}")]
    Config {
        /// What was wrong.
        reason: String,
    },

    /// A command-line value could not be used.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An alert file was not valid JSON.
    #[error("invalid alert file '{}': {source}", path.display())]
    AlertFile {
        /// The file that failed to parse.
        path: PathBuf,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// An id or enum value failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Alert intake failed part way through.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates a [`CliError::Config`].
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

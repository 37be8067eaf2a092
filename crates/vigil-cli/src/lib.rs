//! # vigil-cli
//!
//! Vigil command-line interface.
//!
//! Provides commands for:
//! - Alert intake (store, triage, escalate)
//! - Dry-run triage
//! - Incident and service inspection
//! - The public status page
//!
//! # Architecture
//!
//! Every command runs against a [`FileStore`](vigil_store::FileStore) in the
//! configured state directory, so records persist between invocations.
//!
//! ```text
//! ┌───────────┐   AlertRepository   ┌──────────────────────────┐
//! │ vigil-cli │────────────────────►│ FileStore (vigil.json)   │
//! └───────────┘                     └──────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{AlertCommands, AlertInput, Cli, Commands, Format, IncidentCommands, ServiceCommands};
pub use config::VigilConfig;
pub use error::CliError;
pub use output::OutputFormat;

//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`alert`] - Alert intake and listing
//! - [`incident`] - Incident listing and status changes
//! - [`service`] - Service registry
//! - [`triage`] - Dry-run triage
//! - [`status`] - Public status page

pub mod alert;
pub mod incident;
pub mod service;
pub mod status;
pub mod triage;

pub use alert::AlertCommand;
pub use incident::IncidentCommand;
pub use service::ServiceCommand;
pub use status::StatusCommand;
pub use triage::TriageCommand;

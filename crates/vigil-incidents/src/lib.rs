//! Incident orchestration for Vigil.
//!
//! [`IncidentOrchestrator`] is the single entry point for inbound alerts. It
//! stores the alert, has it reviewed by a [`TriageAgent`](vigil_triage::TriageAgent),
//! and opens an incident when the review decides `start_incident`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vigil_incidents::IncidentOrchestrator;
//! use vigil_store::MemoryStore;
//! use vigil_types::{AlertRequest, AlertSeverity, IncidentStatus};
//!
//! let orchestrator = IncidentOrchestrator::new(Arc::new(MemoryStore::new()));
//! let outcome = orchestrator
//!     .handle_create_alert(AlertRequest {
//!         title: "Checkout API errors".to_string(),
//!         description: "Upstream timeout".to_string(),
//!         severity: AlertSeverity::Critical,
//!         ..AlertRequest::default()
//!     })
//!     .unwrap();
//!
//! let incident = outcome.incident.unwrap();
//! assert_eq!(incident.status, IncidentStatus::Investigating);
//! assert_eq!(incident.service, "unknown");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod orchestrator;

pub use error::{OrchestratorError, PersistStep, Result};
pub use orchestrator::{
    AlertOutcome, INCIDENT_TITLE_PREFIX, IncidentOrchestrator, STATUS_PAGE_PREFIX,
};

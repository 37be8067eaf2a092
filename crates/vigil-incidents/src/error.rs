//! Error types for the vigil-incidents crate.

use thiserror::Error;
use vigil_store::StoreError;

/// The store call that was in flight when processing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistStep {
    /// Inserting the normalized alert.
    SaveAlert,
    /// Attaching the triage report.
    UpdateTriage,
    /// Upserting the affected service.
    EnsureService,
    /// Inserting the incident.
    CreateIncident,
    /// Marking the alert as having an open incident.
    UpdateAlertStatus,
}

impl PersistStep {
    /// Returns the step as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SaveAlert => "save_alert",
            Self::UpdateTriage => "update_alert_triage",
            Self::EnsureService => "ensure_service",
            Self::CreateIncident => "create_incident",
            Self::UpdateAlertStatus => "update_alert_status",
        }
    }
}

impl std::fmt::Display for PersistStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors surfaced by the orchestrator.
///
/// Every failure is a persistence failure. Writes that completed before the
/// failing step stay committed.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A store call failed; remaining steps were skipped.
    #[error("persistence failure during {step}: {source}")]
    Persistence {
        /// The step that failed.
        step: PersistStep,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },
}

impl OrchestratorError {
    /// Returns the step that failed.
    #[must_use]
    pub const fn step(&self) -> PersistStep {
        match self {
            Self::Persistence { step, .. } => *step,
        }
    }
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

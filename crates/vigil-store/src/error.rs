//! Error types for the vigil-store crate.

use thiserror::Error;
use vigil_persist::PersistError;
use vigil_types::{AlertId, IncidentId};

/// Errors that can occur while reading or writing records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Alert with the given ID was not found.
    #[error("alert not found: {id}")]
    AlertNotFound {
        /// The alert ID that was not found.
        id: AlertId,
    },

    /// Incident with the given ID was not found.
    #[error("incident not found: {id}")]
    IncidentNotFound {
        /// The incident ID that was not found.
        id: IncidentId,
    },

    /// The snapshot backing the store could not be written.
    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

//! Persistence contract for alerts, incidents and services.
//!
//! [`AlertRepository`] is the narrow interface the incident orchestrator and
//! the availability queries need from storage. Two backends are provided:
//!
//! - [`MemoryStore`]: process-local records behind a `parking_lot` lock
//! - [`FileStore`]: the same records, snapshotted to a JSON file on every write
//!
//! Identity is a single monotonically increasing counter shared by all record
//! kinds and mutated under the store's write lock.
//!
//! # Example
//!
//! ```rust
//! use vigil_store::{AlertRepository, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let first = store.ensure_service("payments").unwrap();
//! let again = store.ensure_service("payments").unwrap();
//! assert_eq!(first.id, again.id);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod file;
pub mod memory;
pub mod state;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use state::StoreState;
pub use vigil_persist::PersistError;

use vigil_types::{
    Alert, AlertId, AlertStatus, Incident, IncidentId, IncidentStatus, NewAlert, NewIncident,
    Service, TriageReport,
};

/// Storage operations used by the alert pipeline.
///
/// Calls are independent: nothing here groups several writes into one
/// transaction.
pub trait AlertRepository: Send + Sync {
    /// Stores a new alert, assigning its id and creation time.
    fn save_alert(&self, alert: NewAlert) -> Result<Alert>;

    /// Attaches a triage report and sets the alert's status to `triaged`.
    fn update_alert_triage(&self, alert_id: AlertId, report: &TriageReport) -> Result<()>;

    /// Sets an alert's status.
    fn update_alert_status(&self, alert_id: AlertId, status: AlertStatus) -> Result<()>;

    /// Returns the service called `name`, creating it on first reference.
    ///
    /// Repeated calls with the same name return the same record.
    fn ensure_service(&self, name: &str) -> Result<Service>;

    /// Stores a new incident, assigning its id and any missing creation time.
    ///
    /// An empty service name is recorded as `unknown`.
    fn create_incident(&self, incident: NewIncident) -> Result<Incident>;

    /// Moves an incident to a new status.
    ///
    /// Entering `resolved` stamps `resolved_at`; any other status clears it.
    fn update_incident_status(&self, id: IncidentId, status: IncidentStatus) -> Result<Incident>;

    /// Returns every alert.
    fn alerts(&self) -> Result<Vec<Alert>>;

    /// Returns every incident.
    fn incidents(&self) -> Result<Vec<Incident>>;

    /// Returns every service.
    fn services(&self) -> Result<Vec<Service>>;
}

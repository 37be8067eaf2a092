//! Store that survives restarts by snapshotting to a JSON file.

use std::path::Path;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};
use vigil_persist::JsonStore;
use vigil_types::{
    Alert, AlertId, AlertStatus, Incident, IncidentId, IncidentStatus, NewAlert, NewIncident,
    Service, TriageReport,
};

use crate::AlertRepository;
use crate::error::Result;
use crate::state::StoreState;

/// Snapshot file name inside the state directory.
pub const SNAPSHOT_NAME: &str = "vigil";

/// In-memory records backed by a JSON snapshot written after every change.
///
/// Each write is applied to a copy of the records, persisted, and only then
/// made visible. A failed snapshot therefore leaves the store unchanged.
#[derive(Debug)]
pub struct FileStore {
    state: RwLock<StoreState>,
    snapshot: JsonStore,
}

impl FileStore {
    /// Opens the store in `state_dir`, loading any existing snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot exists but cannot be read.
    pub fn open(state_dir: &Path) -> Result<Self> {
        let snapshot = JsonStore::new(state_dir, SNAPSHOT_NAME);
        let state = snapshot.try_load::<StoreState>()?.unwrap_or_default();
        debug!(
            path = %snapshot.path().display(),
            alerts = state.alerts().len(),
            incidents = state.incidents().len(),
            services = state.services().len(),
            "loaded store snapshot"
        );
        Ok(Self {
            state: RwLock::new(state),
            snapshot,
        })
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.snapshot.path()
    }

    fn write<T>(&self, op: impl FnOnce(&mut StoreState) -> Result<T>) -> Result<T> {
        let mut guard = self.state.write();
        let mut next = guard.clone();
        let out = op(&mut next)?;
        self.snapshot.save(&next)?;
        *guard = next;
        Ok(out)
    }
}

impl AlertRepository for FileStore {
    fn save_alert(&self, alert: NewAlert) -> Result<Alert> {
        let alert = self.write(|s| Ok(s.save_alert(alert, Utc::now())))?;
        debug!(alert_id = %alert.id, "alert saved");
        Ok(alert)
    }

    fn update_alert_triage(&self, alert_id: AlertId, report: &TriageReport) -> Result<()> {
        self.write(|s| s.update_alert_triage(alert_id, report))
    }

    fn update_alert_status(&self, alert_id: AlertId, status: AlertStatus) -> Result<()> {
        self.write(|s| s.update_alert_status(alert_id, status))
    }

    fn ensure_service(&self, name: &str) -> Result<Service> {
        {
            let state = self.state.read();
            if let Some(existing) = state.services().iter().find(|s| s.name == name) {
                return Ok(existing.clone());
            }
        }
        self.write(|s| Ok(s.ensure_service(name, Utc::now())))
    }

    fn create_incident(&self, incident: NewIncident) -> Result<Incident> {
        let incident = self.write(|s| Ok(s.create_incident(incident, Utc::now())))?;
        info!(incident_id = %incident.id, service = %incident.service, "incident created");
        Ok(incident)
    }

    fn update_incident_status(&self, id: IncidentId, status: IncidentStatus) -> Result<Incident> {
        self.write(|s| s.update_incident_status(id, status, Utc::now()))
    }

    fn alerts(&self) -> Result<Vec<Alert>> {
        Ok(self.state.read().alerts().to_vec())
    }

    fn incidents(&self) -> Result<Vec<Incident>> {
        Ok(self.state.read().incidents().to_vec())
    }

    fn services(&self) -> Result<Vec<Service>> {
        Ok(self.state.read().services().to_vec())
    }
}

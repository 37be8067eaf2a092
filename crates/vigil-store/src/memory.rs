//! In-memory store.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};
use vigil_types::{
    Alert, AlertId, AlertStatus, Incident, IncidentId, IncidentStatus, NewAlert, NewIncident,
    Service, TriageReport,
};

use crate::AlertRepository;
use crate::error::Result;
use crate::state::StoreState;

/// Thread-safe, process-local store.
///
/// Clones share the same underlying records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertRepository for MemoryStore {
    fn save_alert(&self, alert: NewAlert) -> Result<Alert> {
        let alert = self.state.write().save_alert(alert, Utc::now());
        debug!(alert_id = %alert.id, "alert saved");
        Ok(alert)
    }

    fn update_alert_triage(&self, alert_id: AlertId, report: &TriageReport) -> Result<()> {
        self.state.write().update_alert_triage(alert_id, report)
    }

    fn update_alert_status(&self, alert_id: AlertId, status: AlertStatus) -> Result<()> {
        self.state.write().update_alert_status(alert_id, status)
    }

    fn ensure_service(&self, name: &str) -> Result<Service> {
        Ok(self.state.write().ensure_service(name, Utc::now()))
    }

    fn create_incident(&self, incident: NewIncident) -> Result<Incident> {
        let incident = self.state.write().create_incident(incident, Utc::now());
        info!(incident_id = %incident.id, service = %incident.service, "incident created");
        Ok(incident)
    }

    fn update_incident_status(&self, id: IncidentId, status: IncidentStatus) -> Result<Incident> {
        self.state
            .write()
            .update_incident_status(id, status, Utc::now())
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use vigil_types::{AlertRequest, AlertSeverity};

    #[test]
    fn clones_share_records() {
        let store = MemoryStore::new();
        let other = store.clone();
        store
            .save_alert(AlertRequest::default().normalize())
            .unwrap();
        assert_eq!(other.alerts().unwrap().len(), 1);
    }

    #[test]
    fn triage_update_marks_alert_triaged() {
        let store = MemoryStore::new();
        let alert = store
            .save_alert(AlertRequest::default().normalize())
            .unwrap();

        let report = vigil_types::TriageReport {
            summary: "s".to_string(),
            likely_root_cause: "r".to_string(),
            suggested_actions: Vec::new(),
            decision: vigil_types::TriageDecision::CreateIssue,
            issue_title: "Follow-up".to_string(),
            auto_fix_plan: Vec::new(),
            timeline: Vec::new(),
            confidence: vigil_types::Confidence::Medium,
            reviewed_at: Utc::now(),
        };
        store.update_alert_triage(alert.id, &report).unwrap();

        let stored = &store.alerts().unwrap()[0];
        assert_eq!(stored.status, AlertStatus::Triaged);
        assert_eq!(stored.triage.as_ref(), Some(&report));
    }

    #[test]
    fn ensure_service_returns_same_identity() {
        let store = MemoryStore::new();
        let first = store.ensure_service("payments").unwrap();
        let second = store.ensure_service("payments").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.services().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_ensure_service_creates_one_record() {
        let store = MemoryStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || store.ensure_service("search").unwrap().id)
            })
            .collect();

        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.services().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_saves_get_distinct_ids() {
        let store = MemoryStore::new();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    store
                        .save_alert(
                            AlertRequest {
                                severity: AlertSeverity::Warning,
                                ..AlertRequest::default()
                            }
                            .normalize(),
                        )
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}

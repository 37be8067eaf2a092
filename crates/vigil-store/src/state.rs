//! The record set shared by every store backend.
//!
//! [`StoreState`] holds all records plus the id counter and implements the
//! contract's write rules. Backends differ only in how they guard and
//! persist it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_types::{
    Alert, AlertId, AlertStatus, Incident, IncidentId, IncidentStatus, NewAlert, NewIncident,
    Service, ServiceId, TriageReport, UNKNOWN_SERVICE,
};

use crate::error::{Result, StoreError};

/// All records held by a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Last value handed out by the id counter.
    last_id: u64,
    /// Alerts in insertion order.
    alerts: Vec<Alert>,
    /// Incidents in insertion order.
    incidents: Vec<Incident>,
    /// Services in insertion order, unique by name.
    services: Vec<Service>,
}

impl StoreState {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn alert_mut(&mut self, id: AlertId) -> Result<&mut Alert> {
        self.alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::AlertNotFound { id })
    }

    /// Stores a new alert, assigning its id and creation time.
    pub fn save_alert(&mut self, alert: NewAlert, now: DateTime<Utc>) -> Alert {
        let id = AlertId::new(self.next_id());
        let alert = alert.into_alert(id, now);
        self.alerts.push(alert.clone());
        alert
    }

    /// Attaches a triage report and marks the alert triaged.
    pub fn update_alert_triage(&mut self, id: AlertId, report: &TriageReport) -> Result<()> {
        let alert = self.alert_mut(id)?;
        alert.triage = Some(report.clone());
        alert.status = AlertStatus::Triaged;
        Ok(())
    }

    /// Sets an alert's status.
    pub fn update_alert_status(&mut self, id: AlertId, status: AlertStatus) -> Result<()> {
        self.alert_mut(id)?.status = status;
        Ok(())
    }

    /// Returns the service called `name`, creating it if needed.
    ///
    /// A blank name refers to [`UNKNOWN_SERVICE`].
    pub fn ensure_service(&mut self, name: &str, now: DateTime<Utc>) -> Service {
        let name = if name.trim().is_empty() {
            UNKNOWN_SERVICE
        } else {
            name
        };

        if let Some(existing) = self.services.iter().find(|s| s.name == name) {
            return existing.clone();
        }

        let service = Service {
            id: ServiceId::new(self.next_id()),
            name: name.to_string(),
            description: String::new(),
            created_at: now,
        };
        self.services.push(service.clone());
        service
    }

    /// Stores a new incident.
    ///
    /// Fills in the creation time and service name when absent, registers the
    /// service, and keeps `resolved_at` consistent with the status.
    pub fn create_incident(&mut self, incident: NewIncident, now: DateTime<Utc>) -> Incident {
        let service = self.ensure_service(&incident.service, now).name;
        let resolved_at = if incident.status.is_resolved() {
            Some(incident.resolved_at.unwrap_or(now))
        } else {
            None
        };

        let incident = Incident {
            id: IncidentId::new(self.next_id()),
            alert_id: incident.alert_id,
            service,
            title: incident.title,
            severity: incident.severity,
            status: incident.status,
            status_page_url: incident.status_page_url,
            created_at: incident.created_at.unwrap_or(now),
            resolved_at,
        };
        self.incidents.push(incident.clone());
        incident
    }

    /// Moves an incident to `status`, stamping or clearing `resolved_at`.
    pub fn update_incident_status(
        &mut self,
        id: IncidentId,
        status: IncidentStatus,
        now: DateTime<Utc>,
    ) -> Result<Incident> {
        let incident = self
            .incidents
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::IncidentNotFound { id })?;

        incident.resolved_at = if status.is_resolved() {
            Some(incident.resolved_at.unwrap_or(now))
        } else {
            None
        };
        incident.status = status;
        Ok(incident.clone())
    }

    /// Returns all alerts.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Returns all incidents.
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Returns all services.
    pub fn services(&self) -> &[Service] {
        &self.services
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vigil_types::{AlertRequest, AlertSeverity};

    fn new_incident(service: &str, status: IncidentStatus) -> NewIncident {
        NewIncident {
            alert_id: AlertId::new(1),
            service: service.to_string(),
            title: "Checkout down".to_string(),
            severity: AlertSeverity::Critical,
            status,
            status_page_url: "/status/alt-000001".to_string(),
            created_at: None,
            resolved_at: None,
        }
    }

    mod alert_tests {
        use super::*;

        #[test]
        fn save_assigns_sequential_ids() {
            let mut state = StoreState::default();
            let now = Utc::now();
            let a = state.save_alert(AlertRequest::default().normalize(), now);
            let b = state.save_alert(AlertRequest::default().normalize(), now);
            assert_eq!(a.id, AlertId::new(1));
            assert_eq!(b.id, AlertId::new(2));
            assert_eq!(a.created_at, now);
            assert_eq!(state.alerts().len(), 2);
        }

        #[test]
        fn update_missing_alert_fails() {
            let mut state = StoreState::default();
            let err = state
                .update_alert_status(AlertId::new(99), AlertStatus::Triaged)
                .unwrap_err();
            assert!(matches!(err, StoreError::AlertNotFound { .. }));
        }
    }

    mod service_tests {
        use super::*;

        #[test]
        fn ensure_service_is_idempotent() {
            let mut state = StoreState::default();
            let now = Utc::now();
            let first = state.ensure_service("payments", now);
            let second = state.ensure_service("payments", now + Duration::hours(1));
            assert_eq!(first, second);
            assert_eq!(state.services().len(), 1);
        }

        #[test]
        fn blank_name_maps_to_unknown() {
            let mut state = StoreState::default();
            let service = state.ensure_service("  ", Utc::now());
            assert_eq!(service.name, UNKNOWN_SERVICE);
        }
    }

    mod incident_tests {
        use super::*;

        #[test]
        fn create_registers_service_and_defaults() {
            let mut state = StoreState::default();
            let now = Utc::now();
            let incident = state.create_incident(new_incident("", IncidentStatus::Investigating), now);

            assert_eq!(incident.service, UNKNOWN_SERVICE);
            assert_eq!(incident.created_at, now);
            assert!(incident.resolved_at.is_none());
            assert_eq!(state.services().len(), 1);
        }

        #[test]
        fn create_keeps_supplied_created_at() {
            let mut state = StoreState::default();
            let earlier = Utc::now() - Duration::hours(2);
            let mut new = new_incident("search", IncidentStatus::Investigating);
            new.created_at = Some(earlier);
            assert_eq!(state.create_incident(new, Utc::now()).created_at, earlier);
        }

        #[test]
        fn create_resolved_stamps_resolved_at() {
            let mut state = StoreState::default();
            let now = Utc::now();
            let incident = state.create_incident(new_incident("search", IncidentStatus::Resolved), now);
            assert_eq!(incident.resolved_at, Some(now));
        }

        #[test]
        fn create_unresolved_drops_resolved_at() {
            let mut state = StoreState::default();
            let mut new = new_incident("search", IncidentStatus::Identified);
            new.resolved_at = Some(Utc::now());
            assert!(state.create_incident(new, Utc::now()).resolved_at.is_none());
        }

        #[test]
        fn status_update_maintains_resolved_at() {
            let mut state = StoreState::default();
            let now = Utc::now();
            let id = state
                .create_incident(new_incident("search", IncidentStatus::Investigating), now)
                .id;

            let resolved = state
                .update_incident_status(id, IncidentStatus::Resolved, now + Duration::minutes(30))
                .unwrap();
            assert_eq!(resolved.resolved_at, Some(now + Duration::minutes(30)));

            let again = state
                .update_incident_status(id, IncidentStatus::Resolved, now + Duration::hours(5))
                .unwrap();
            assert_eq!(again.resolved_at, resolved.resolved_at);

            let reopened = state
                .update_incident_status(id, IncidentStatus::Monitoring, now)
                .unwrap();
            assert!(reopened.resolved_at.is_none());
            assert_eq!(state.incidents()[0].status, IncidentStatus::Monitoring);
        }

        #[test]
        fn status_update_missing_incident_fails() {
            let mut state = StoreState::default();
            let err = state
                .update_incident_status(IncidentId::new(5), IncidentStatus::Resolved, Utc::now())
                .unwrap_err();
            assert!(matches!(err, StoreError::IncidentNotFound { .. }));
        }
    }
}

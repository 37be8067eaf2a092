//! Alert intake: store, triage, and open an incident when warranted.
//!
//! [`IncidentOrchestrator::handle_create_alert`] runs these steps in order,
//! stopping at the first store failure:
//!
//! 1. normalize the request and store the alert
//! 2. review it with the configured [`TriageAgent`]
//! 3. attach the report (the alert becomes `triaged`)
//! 4. if the decision is `start_incident`: upsert the service, create the
//!    incident, and mark the alert `incident_open`
//!
//! The store calls are not grouped into a transaction and nothing is rolled
//! back. A failure after step 3 leaves a `triaged` alert with no incident,
//! which looks the same as an alert that never needed one. Alerts are not
//! fingerprinted either: two qualifying alerts for one service open two
//! incidents.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;
use vigil_store::AlertRepository;
use vigil_triage::{HeuristicAgent, TriageAgent};
use vigil_types::{
    Alert, AlertRequest, AlertStatus, Incident, IncidentStatus, NewIncident, TriageDecision,
    UNKNOWN_SERVICE,
};

use crate::error::{OrchestratorError, PersistStep, Result};

/// Prefix of auto-created incident titles.
pub const INCIDENT_TITLE_PREFIX: &str = "Auto-created incident for triaged alert: ";

/// Path prefix of incident status pages.
pub const STATUS_PAGE_PREFIX: &str = "/status/";

/// What happened to a submitted alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertOutcome {
    /// The stored alert with its triage report attached.
    pub alert: Alert,
    /// The incident opened for it, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident: Option<Incident>,
}

/// Sequences alert intake against a store and a triage agent.
#[derive(Clone)]
pub struct IncidentOrchestrator {
    store: Arc<dyn AlertRepository>,
    agent: Arc<dyn TriageAgent>,
}

impl std::fmt::Debug for IncidentOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncidentOrchestrator").finish_non_exhaustive()
    }
}

impl IncidentOrchestrator {
    /// Creates an orchestrator using the standard [`HeuristicAgent`].
    #[must_use]
    pub fn new(store: Arc<dyn AlertRepository>) -> Self {
        Self::with_agent(store, Arc::new(HeuristicAgent::new()))
    }

    /// Creates an orchestrator with a custom triage agent.
    #[must_use]
    pub fn with_agent(store: Arc<dyn AlertRepository>, agent: Arc<dyn TriageAgent>) -> Self {
        Self { store, agent }
    }

    /// Stores, triages and, when the decision calls for it, escalates an alert.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Persistence`] naming the first store call
    /// that failed. Earlier writes are left in place.
    pub fn handle_create_alert(&self, request: AlertRequest) -> Result<AlertOutcome> {
        let request_id = Uuid::new_v4();
        let span = info_span!("handle_create_alert", %request_id);
        let _guard = span.enter();

        let mut alert = self
            .store
            .save_alert(request.normalize())
            .map_err(persistence(PersistStep::SaveAlert))?;

        let report = self.agent.review(&alert);
        self.store
            .update_alert_triage(alert.id, &report)
            .map_err(persistence(PersistStep::UpdateTriage))?;

        let decision = report.decision;
        alert.triage = Some(report);
        alert.status = AlertStatus::Triaged;

        info!(
            alert_id = %alert.id,
            severity = %alert.severity,
            decision = %decision,
            "alert triaged"
        );

        if decision != TriageDecision::StartIncident {
            return Ok(AlertOutcome {
                alert,
                incident: None,
            });
        }

        let service = alert.service().unwrap_or(UNKNOWN_SERVICE).to_string();
        self.store
            .ensure_service(&service)
            .map_err(persistence(PersistStep::EnsureService))?;

        let incident = self
            .store
            .create_incident(NewIncident {
                alert_id: alert.id,
                service,
                title: format!("{INCIDENT_TITLE_PREFIX}{}", alert.title),
                severity: alert.severity,
                status: IncidentStatus::Investigating,
                status_page_url: format!("{STATUS_PAGE_PREFIX}{}", alert.id),
                created_at: None,
                resolved_at: None,
            })
            .map_err(persistence(PersistStep::CreateIncident))?;

        self.store
            .update_alert_status(alert.id, AlertStatus::IncidentOpen)
            .map_err(persistence(PersistStep::UpdateAlertStatus))?;
        alert.status = AlertStatus::IncidentOpen;

        info!(
            alert_id = %alert.id,
            incident_id = %incident.id,
            service = %incident.service,
            "incident opened"
        );

        Ok(AlertOutcome {
            alert,
            incident: Some(incident),
        })
    }
}

fn persistence(step: PersistStep) -> impl FnOnce(vigil_store::StoreError) -> OrchestratorError {
    move |source| {
        warn!(step = %step, error = %source, "store call failed, aborting alert intake");
        OrchestratorError::Persistence { step, source }
    }
}

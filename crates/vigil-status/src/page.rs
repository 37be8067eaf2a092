//! Public status page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use vigil_types::{AlertSeverity, Incident, IncidentId, IncidentStatus, Service, ServiceAvailability};

use crate::availability::{OverlapPolicy, compute_availability_with};
use crate::window::ReportingWindow;

/// Message shown on every publicly open incident.
pub const CURRENT_MESSAGE: &str =
    "Incident declared. Command role assigned, communications started, mitigation in progress.";

/// Response steps attached to every publicly open incident.
pub const RESPONSE_PLAYBOOK: [&str; 4] = [
    "Assign incident commander and define communication cadence",
    "Assess customer impact against SLOs and error budget policy",
    "Stabilize service and execute mitigation plan",
    "Capture timeline and prepare blameless postmortem",
];

/// Headline status of the whole system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// No publicly open incidents.
    #[default]
    Operational,
    /// Only non-critical incidents are open.
    DegradedPerformance,
    /// At least one critical incident is open.
    MajorOutage,
}

impl OverallStatus {
    /// Returns the status as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::DegradedPerformance => "degraded_performance",
            Self::MajorOutage => "major_outage",
        }
    }

    /// Folds one publicly open incident of `severity` into the status.
    ///
    /// Critical always yields `major_outage`; anything else only moves
    /// `operational` to `degraded_performance`.
    #[must_use]
    pub const fn escalate(self, severity: AlertSeverity) -> Self {
        match (self, severity) {
            (_, AlertSeverity::Critical) => Self::MajorOutage,
            (Self::Operational, _) => Self::DegradedPerformance,
            (current, _) => current,
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives the headline status from every incident.
///
/// Only `investigating` and `identified` incidents count.
#[must_use]
pub fn derive_overall_status(incidents: &[Incident]) -> OverallStatus {
    incidents
        .iter()
        .filter(|incident| incident.status.is_publicly_open())
        .fold(OverallStatus::Operational, |status, incident| {
            status.escalate(incident.severity)
        })
}

/// An incident as shown on the public status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIncident {
    /// Incident id.
    pub id: IncidentId,
    /// Affected service.
    pub service: String,
    /// Title.
    pub title: String,
    /// Severity.
    pub severity: AlertSeverity,
    /// Current status.
    pub status: IncidentStatus,
    /// When the incident was declared.
    pub declared_at: DateTime<Utc>,
    /// Per-incident status page path.
    pub status_page_url: String,
    /// Public update text.
    pub current_message: String,
    /// Response steps.
    pub response_playbook: Vec<String>,
}

impl From<&Incident> for PublicIncident {
    fn from(incident: &Incident) -> Self {
        Self {
            id: incident.id,
            service: incident.service.clone(),
            title: incident.title.clone(),
            severity: incident.severity,
            status: incident.status.clone(),
            declared_at: incident.created_at,
            status_page_url: incident.status_page_url.clone(),
            current_message: CURRENT_MESSAGE.to_string(),
            response_playbook: RESPONSE_PLAYBOOK.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Everything the public status page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPage {
    /// Headline status.
    pub overall_status: OverallStatus,
    /// When the page was built.
    pub updated_at: DateTime<Utc>,
    /// Reporting window start.
    pub period_start: DateTime<Utc>,
    /// Reporting window end.
    pub period_end: DateTime<Utc>,
    /// Availability per service, sorted by name.
    pub services: Vec<ServiceAvailability>,
    /// Publicly open incidents in store order.
    pub incidents: Vec<PublicIncident>,
}

impl StatusPage {
    /// Builds the page from store snapshots.
    #[must_use]
    pub fn build(
        services: &[Service],
        incidents: &[Incident],
        window: ReportingWindow,
        policy: OverlapPolicy,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let availability =
            compute_availability_with(services, incidents, window.start, window.end, policy);
        let public: Vec<PublicIncident> = incidents
            .iter()
            .filter(|incident| incident.status.is_publicly_open())
            .map(PublicIncident::from)
            .collect();
        let overall_status = derive_overall_status(incidents);

        info!(
            overall_status = %overall_status,
            open_incidents = public.len(),
            services = availability.len(),
            "status page built"
        );

        Self {
            overall_status,
            updated_at,
            period_start: window.start,
            period_end: window.end,
            services: availability,
            incidents: public,
        }
    }
}

//! Incident records.

use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::AlertSeverity;
use crate::id::{AlertId, IncidentId};

/// Lifecycle status of an incident.
///
/// The status is free-form on the wire. The well-known values get their own
/// variants; anything else is preserved in [`IncidentStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentStatus {
    /// Response has started; impact is being assessed.
    Investigating,
    /// The cause is known and a fix is in progress.
    Identified,
    /// A fix is deployed and recovery is being watched.
    Monitoring,
    /// The incident is over.
    Resolved,
    /// Any other producer-defined status.
    Other(String),
}

impl IncidentStatus {
    /// Returns the status as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Investigating => "investigating",
            Self::Identified => "identified",
            Self::Monitoring => "monitoring",
            Self::Resolved => "resolved",
            Self::Other(s) => s,
        }
    }

    /// Returns true while the incident is shown on the public status page.
    #[must_use]
    pub const fn is_publicly_open(&self) -> bool {
        matches!(self, Self::Investigating | Self::Identified)
    }

    /// Returns true for [`IncidentStatus::Resolved`].
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for IncidentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "investigating" => Self::Investigating,
            "identified" => Self::Identified,
            "monitoring" => Self::Monitoring,
            "resolved" => Self::Resolved,
            _ => Self::Other(value),
        }
    }
}

impl From<IncidentStatus> for String {
    fn from(status: IncidentStatus) -> Self {
        match status {
            IncidentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for IncidentStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.trim().to_string()))
    }
}

/// An incident that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    /// The alert that triggered the incident.
    pub alert_id: AlertId,
    /// Affected service; empty means [`UNKNOWN_SERVICE`](crate::UNKNOWN_SERVICE).
    pub service: String,
    /// Incident title.
    pub title: String,
    /// Severity inherited from the alert.
    pub severity: AlertSeverity,
    /// Initial status.
    pub status: IncidentStatus,
    /// Public status page path.
    pub status_page_url: String,
    /// Declaration time; the store stamps "now" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Resolution time; the store stamps "now" for resolved incidents when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// A persisted incident.
///
/// `resolved_at` is set exactly when `status` is [`IncidentStatus::Resolved`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Store-assigned identifier.
    pub id: IncidentId,
    /// The alert that triggered the incident.
    pub alert_id: AlertId,
    /// Affected service name.
    pub service: String,
    /// Incident title.
    pub title: String,
    /// Severity inherited from the alert.
    pub severity: AlertSeverity,
    /// Current status.
    pub status: IncidentStatus,
    /// Public status page path.
    pub status_page_url: String,
    /// When the incident was declared.
    pub created_at: DateTime<Utc>,
    /// When the incident was resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

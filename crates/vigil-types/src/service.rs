//! Service records and availability results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ServiceId;

/// Service name used when an alert or incident does not name one.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// A named component that incidents are attributed to.
///
/// Services are keyed by `name`; the store never holds two records with the
/// same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Store-assigned identifier.
    pub id: ServiceId,
    /// Unique service name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// When the service was first referenced.
    pub created_at: DateTime<Utc>,
}

/// Availability of one service over a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAvailability {
    /// Service name.
    pub service: String,
    /// Percentage of the window the service was up, within `[0, 100]`.
    pub availability_percent: f64,
    /// Whole minutes of attributed downtime.
    pub downtime_minutes: u64,
    /// Window start.
    pub period_start: DateTime<Utc>,
    /// Window end.
    pub period_end: DateTime<Utc>,
}

//! Alert records and their inbound request shape.
//!
//! An alert arrives as an [`AlertRequest`] (every field optional, unknown
//! label and payload keys kept verbatim), is normalized into a [`NewAlert`],
//! and becomes an [`Alert`] once the store assigns its id and creation time.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;
use crate::id::AlertId;
use crate::triage::TriageReport;

/// Source recorded for alerts that do not name one.
pub const DEFAULT_ALERT_SOURCE: &str = "grafana";

/// Free-form string labels attached to an alert.
///
/// Only `metric` and `service` carry meaning inside the pipeline; every other
/// key is passed through untouched.
pub type Labels = HashMap<String, String>;

/// Opaque structured payload carried alongside an alert.
pub type Payload = HashMap<String, serde_json::Value>;

/// The severity level of an alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational alert, no action required.
    #[default]
    Info,
    /// Warning alert, should be investigated.
    Warning,
    /// Critical alert, requires immediate attention.
    Critical,
}

impl AlertSeverity {
    /// Returns the severity as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Returns true for [`AlertSeverity::Critical`].
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertSeverity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseError::UnknownVariant {
                kind: "severity",
                value: s.to_string(),
            }),
        }
    }
}

/// Where an alert is in its lifecycle.
///
/// The only transitions are `received -> triaged` (always, after review) and
/// `triaged -> incident_open` (only when an incident is opened).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    /// Stored but not yet reviewed.
    #[default]
    Received,
    /// A triage report has been attached.
    Triaged,
    /// An incident was opened for this alert.
    IncidentOpen,
}

impl AlertStatus {
    /// Returns the status as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Triaged => "triaged",
            Self::IncidentOpen => "incident_open",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "received" => Ok(Self::Received),
            "triaged" => Ok(Self::Triaged),
            "incident_open" => Ok(Self::IncidentOpen),
            _ => Err(ParseError::UnknownVariant {
                kind: "alert status",
                value: s.to_string(),
            }),
        }
    }
}

/// Inbound alert as submitted by a producer such as Grafana.
///
/// Every field is optional on the wire. Call [`AlertRequest::normalize`]
/// before handing it to a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRequest {
    /// Producer of the alert; empty means [`DEFAULT_ALERT_SOURCE`].
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    /// Short human-readable title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Longer description, scanned by the triage rules.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Reported severity.
    pub severity: AlertSeverity,
    /// Requested initial status; absent, null or `""` means
    /// [`AlertStatus::Received`].
    #[serde(deserialize_with = "empty_status_as_none")]
    pub status: Option<AlertStatus>,
    /// Open key-value labels.
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Labels,
    /// Opaque payload.
    #[serde(deserialize_with = "null_as_default")]
    pub payload: Payload,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn empty_status_as_none<'de, D>(deserializer: D) -> Result<Option<AlertStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl AlertRequest {
    /// Applies ingestion defaults, producing a record ready to be stored.
    #[must_use]
    pub fn normalize(self) -> NewAlert {
        let source = if self.source.is_empty() {
            DEFAULT_ALERT_SOURCE.to_string()
        } else {
            self.source
        };

        NewAlert {
            source,
            title: self.title,
            description: self.description,
            severity: self.severity,
            status: self.status.unwrap_or_default(),
            labels: self.labels,
            payload: self.payload,
        }
    }
}

/// A normalized alert that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    /// Producer of the alert.
    pub source: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Reported severity.
    pub severity: AlertSeverity,
    /// Initial lifecycle status.
    pub status: AlertStatus,
    /// Open key-value labels.
    pub labels: Labels,
    /// Opaque payload.
    pub payload: Payload,
}

impl NewAlert {
    /// Attaches the store-assigned identity.
    #[must_use]
    pub fn into_alert(self, id: AlertId, created_at: DateTime<Utc>) -> Alert {
        Alert {
            id,
            source: self.source,
            title: self.title,
            description: self.description,
            severity: self.severity,
            status: self.status,
            labels: self.labels,
            payload: self.payload,
            created_at,
            triage: None,
        }
    }
}

/// A persisted alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Store-assigned identifier.
    pub id: AlertId,
    /// Producer of the alert.
    pub source: String,
    /// Short human-readable title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Reported severity.
    pub severity: AlertSeverity,
    /// Current lifecycle status.
    pub status: AlertStatus,
    /// Open key-value labels.
    #[serde(default)]
    pub labels: Labels,
    /// Opaque payload.
    #[serde(default)]
    pub payload: Payload,
    /// When the alert was stored.
    pub created_at: DateTime<Utc>,
    /// Triage report, attached after review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage: Option<TriageReport>,
}

impl Alert {
    /// Well-known label naming the metric that fired.
    pub const METRIC_LABEL: &'static str = "metric";

    /// Well-known label naming the affected service.
    pub const SERVICE_LABEL: &'static str = "service";

    /// Returns a label value, if present.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Returns the `metric` label when present and non-empty.
    #[must_use]
    pub fn metric(&self) -> Option<&str> {
        self.label(Self::METRIC_LABEL).filter(|m| !m.is_empty())
    }

    /// Returns the `service` label when present and not blank.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.label(Self::SERVICE_LABEL)
            .filter(|s| !s.trim().is_empty())
    }

    /// Returns true if the description contains `needle`, ignoring case.
    #[must_use]
    pub fn description_mentions(&self, needle: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_alert() -> Alert {
        AlertRequest {
            title: "Checkout errors".to_string(),
            description: "Upstream TIMEOUT while calling payments".to_string(),
            severity: AlertSeverity::Warning,
            ..AlertRequest::default()
        }
        .normalize()
        .into_alert(AlertId::new(1), Utc::now())
    }

    mod severity_tests {
        use super::*;
        use test_case::test_case;

        #[test]
        fn default_is_info() {
            assert_eq!(AlertSeverity::default(), AlertSeverity::Info);
        }

        #[test_case("info", AlertSeverity::Info ; "info")]
        #[test_case("Warning", AlertSeverity::Warning ; "mixed case")]
        #[test_case(" critical ", AlertSeverity::Critical ; "padded")]
        fn parse(input: &str, expected: AlertSeverity) {
            assert_eq!(input.parse::<AlertSeverity>().unwrap(), expected);
        }

        #[test]
        fn parse_unknown_fails() {
            assert!("fatal".parse::<AlertSeverity>().is_err());
        }

        #[test]
        fn serde_lowercase() {
            let json = serde_json::to_string(&AlertSeverity::Critical).unwrap();
            assert_eq!(json, "\"critical\"");
        }
    }

    mod status_tests {
        use super::*;

        #[test]
        fn serde_snake_case() {
            let json = serde_json::to_string(&AlertStatus::IncidentOpen).unwrap();
            assert_eq!(json, "\"incident_open\"");
            assert_eq!(AlertStatus::IncidentOpen.to_string(), "incident_open");
        }

        #[test]
        fn parse_round_trips_display() {
            for status in [
                AlertStatus::Received,
                AlertStatus::Triaged,
                AlertStatus::IncidentOpen,
            ] {
                assert_eq!(status.to_string().parse::<AlertStatus>().unwrap(), status);
            }
        }
    }

    mod request_tests {
        use super::*;

        #[test]
        fn normalize_applies_defaults() {
            let alert = AlertRequest::default().normalize();
            assert_eq!(alert.source, DEFAULT_ALERT_SOURCE);
            assert_eq!(alert.status, AlertStatus::Received);
        }

        #[test]
        fn normalize_keeps_explicit_values() {
            let alert = AlertRequest {
                source: "prometheus".to_string(),
                status: Some(AlertStatus::Triaged),
                ..AlertRequest::default()
            }
            .normalize();
            assert_eq!(alert.source, "prometheus");
            assert_eq!(alert.status, AlertStatus::Triaged);
        }

        #[test]
        fn deserializes_sparse_body_and_keeps_unknown_keys() {
            let body = r#"{
                "title": "Disk full",
                "severity": "critical",
                "labels": {"service": "search", "team": "infra"},
                "payload": {"value": 97.5, "nested": {"a": [1, 2]}}
            }"#;
            let request: AlertRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.severity, AlertSeverity::Critical);
            assert_eq!(request.labels.get("team").map(String::as_str), Some("infra"));
            assert!(request.payload.contains_key("nested"));
            assert!(request.source.is_empty());
            assert!(request.status.is_none());
        }

        #[test]
        fn empty_status_means_received() {
            let body = r#"{"title": "x", "severity": "critical", "status": ""}"#;
            let request: AlertRequest = serde_json::from_str(body).unwrap();
            assert!(request.status.is_none());
            assert_eq!(request.normalize().status, AlertStatus::Received);
        }

        #[test]
        fn null_fields_take_defaults() {
            let body = r#"{
                "source": null,
                "title": "x",
                "description": null,
                "status": null,
                "labels": null,
                "payload": null
            }"#;
            let alert = serde_json::from_str::<AlertRequest>(body).unwrap().normalize();
            assert_eq!(alert.source, DEFAULT_ALERT_SOURCE);
            assert!(alert.description.is_empty());
            assert_eq!(alert.status, AlertStatus::Received);
            assert!(alert.labels.is_empty());
            assert!(alert.payload.is_empty());
        }

        #[test]
        fn named_status_is_parsed() {
            let request: AlertRequest =
                serde_json::from_str(r#"{"status": "triaged"}"#).unwrap();
            assert_eq!(request.status, Some(AlertStatus::Triaged));
        }

        #[test]
        fn unknown_status_is_rejected() {
            let err = serde_json::from_str::<AlertRequest>(r#"{"status": "snoozed"}"#).unwrap_err();
            assert!(err.to_string().contains("snoozed"));
        }
    }

    mod alert_tests {
        use super::*;

        #[test]
        fn serializes_camel_case_without_triage() {
            let json = serde_json::to_value(sample_alert()).unwrap();
            assert_eq!(json["id"], "alt-000001");
            assert!(json.get("createdAt").is_some());
            assert!(json.get("triage").is_none());
        }

        #[test]
        fn description_mentions_ignores_case() {
            let alert = sample_alert();
            assert!(alert.description_mentions("timeout"));
            assert!(alert.description_mentions("Payments"));
            assert!(!alert.description_mentions("retry"));
        }

        #[test]
        fn metric_requires_non_empty_value() {
            let mut alert = sample_alert();
            assert_eq!(alert.metric(), None);

            alert.labels.insert("metric".to_string(), String::new());
            assert_eq!(alert.metric(), None);

            alert.labels.insert("metric".to_string(), "p99_latency".to_string());
            assert_eq!(alert.metric(), Some("p99_latency"));
        }

        #[test]
        fn service_ignores_blank_value() {
            let mut alert = sample_alert();
            alert.labels.insert("service".to_string(), "   ".to_string());
            assert_eq!(alert.service(), None);

            alert.labels.insert("service".to_string(), "payments".to_string());
            assert_eq!(alert.service(), Some("payments"));
        }
    }
}

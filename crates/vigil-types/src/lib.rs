//! Shared data model for the Vigil alert pipeline.
//!
//! `vigil-types` holds the records that flow between the triage engine, the
//! incident orchestrator, the persistence layer and the availability
//! aggregator:
//!
//! - [`Alert`]: an inbound production alert and its lifecycle status
//! - [`TriageReport`]: the classification attached to an alert after review
//! - [`Incident`]: a tracked outage, optionally opened from a triaged alert
//! - [`Service`]: a named component incidents are attributed to
//! - [`ServiceAvailability`]: the per-service output of an availability query
//!
//! Identity is assigned by the store as a plain counter value. The prefixed
//! form (`alt-000001`) only appears when an id is displayed or serialized.
//!
//! # Example
//!
//! ```rust
//! use vigil_types::{AlertRequest, AlertSeverity, AlertStatus};
//!
//! let request = AlertRequest {
//!     title: "API latency".to_string(),
//!     severity: AlertSeverity::Critical,
//!     ..AlertRequest::default()
//! };
//!
//! let alert = request.normalize();
//! assert_eq!(alert.source, "grafana");
//! assert_eq!(alert.status, AlertStatus::Received);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alert;
pub mod error;
pub mod id;
pub mod incident;
pub mod service;
pub mod triage;

pub use alert::{
    Alert, AlertRequest, AlertSeverity, AlertStatus, DEFAULT_ALERT_SOURCE, Labels, NewAlert,
    Payload,
};
pub use error::{ParseError, Result};
pub use id::{AlertId, IncidentId, ServiceId};
pub use incident::{Incident, IncidentStatus, NewIncident};
pub use service::{Service, ServiceAvailability, UNKNOWN_SERVICE};
pub use triage::{Confidence, TimelinePhase, TimelineStep, TriageDecision, TriageReport};

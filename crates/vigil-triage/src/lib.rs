//! Rule-based alert triage for Vigil.
//!
//! `vigil-triage` classifies an [`Alert`](vigil_types::Alert) into one of three
//! remediation paths and explains why:
//!
//! - **create_issue**: the default, file a follow-up
//! - **start_incident**: critical alerts or anything mentioning customers
//! - **auto_fix**: warnings that mention retries, handed to safe automation
//!
//! Classification is driven by ordered rule tables evaluated with
//! last-match-wins semantics (see [`rules`]). Review is pure: no I/O, no
//! shared state, no error path.
//!
//! # Example
//!
//! ```rust
//! use vigil_triage::{HeuristicAgent, TriageAgent};
//! use vigil_types::{AlertId, AlertRequest, AlertSeverity, TriageDecision};
//!
//! let alert = AlertRequest {
//!     title: "Job queue".to_string(),
//!     description: "retry queue is increasing".to_string(),
//!     severity: AlertSeverity::Warning,
//!     ..AlertRequest::default()
//! }
//! .normalize()
//! .into_alert(AlertId::new(1), chrono::Utc::now());
//!
//! let report = HeuristicAgent::new().review(&alert);
//! assert_eq!(report.decision, TriageDecision::AutoFix);
//! assert_eq!(report.auto_fix_plan.len(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod agent;
pub mod rules;

pub use agent::{HeuristicAgent, SUGGESTED_ACTIONS, TriageAgent};
pub use rules::{DecisionOutcome, DecisionRule, DecisionRules, RootCauseRule, RootCauseRules};

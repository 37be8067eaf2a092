//! Alert reviewers.
//!
//! A [`TriageAgent`] turns an [`Alert`] into a [`TriageReport`]. Review never
//! fails and has no side effects, so agents can be shared freely between
//! threads.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use vigil_types::{
    Alert, Confidence, TimelinePhase, TimelineStep, TriageDecision, TriageReport,
};

use crate::rules::{DecisionRules, RootCauseRules};

/// Standard checks suggested for every alert, independent of its content.
pub const SUGGESTED_ACTIONS: [&str; 3] = [
    "Check SLO burn rate and error budget policy per Google SRE guidance",
    "Review recent deploy and rollback if correlated",
    "Verify service-level indicators in logs/metrics dashboard",
];

const RECEIVED_DETAIL: &str = "Alert ingested and queued for AI triage";
const CONTEXT_DETAIL: &str = "Correlated severity, labels, and recent error patterns";

/// Offsets of each timeline phase before the review instant, in seconds.
pub const TIMELINE_OFFSETS_SECS: [(TimelinePhase, i64); 4] = [
    (TimelinePhase::Received, 5),
    (TimelinePhase::Context, 3),
    (TimelinePhase::Analysis, 1),
    (TimelinePhase::Decision, 0),
];

/// Something that can classify an alert.
pub trait TriageAgent: Send + Sync {
    /// Reviews an alert and produces a report.
    fn review(&self, alert: &Alert) -> TriageReport;
}

/// Deterministic reviewer driven by ordered rule tables.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAgent {
    decisions: DecisionRules,
    root_causes: RootCauseRules,
}

impl HeuristicAgent {
    /// Creates an agent with the standard rule tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reviews `alert` as of `now`.
    ///
    /// Identical severity, description and labels always yield the same
    /// report apart from timestamps, which are all relative to `now`.
    #[must_use]
    pub fn review_at(&self, alert: &Alert, now: DateTime<Utc>) -> TriageReport {
        let root_cause = self.root_causes.evaluate(alert);
        let outcome = self.decisions.evaluate(alert);

        let confidence = if alert.severity.is_critical() {
            Confidence::High
        } else {
            Confidence::Medium
        };

        debug!(
            alert_id = %alert.id,
            decision = %outcome.decision,
            confidence = %confidence,
            "alert reviewed"
        );

        TriageReport {
            summary: outcome.summary,
            timeline: timeline(&root_cause, outcome.decision, now),
            likely_root_cause: root_cause,
            suggested_actions: SUGGESTED_ACTIONS.iter().map(ToString::to_string).collect(),
            decision: outcome.decision,
            issue_title: outcome.issue_title,
            auto_fix_plan: outcome.auto_fix_plan,
            confidence,
            reviewed_at: now,
        }
    }
}

impl TriageAgent for HeuristicAgent {
    fn review(&self, alert: &Alert) -> TriageReport {
        self.review_at(alert, Utc::now())
    }
}

fn timeline(root_cause: &str, decision: TriageDecision, now: DateTime<Utc>) -> Vec<TimelineStep> {
    TIMELINE_OFFSETS_SECS
        .iter()
        .map(|&(phase, offset)| {
            let detail = match phase {
                TimelinePhase::Received => RECEIVED_DETAIL.to_string(),
                TimelinePhase::Context => CONTEXT_DETAIL.to_string(),
                TimelinePhase::Analysis => root_cause.to_string(),
                TimelinePhase::Decision => format!("Decision: {decision}"),
            };
            TimelineStep {
                phase,
                detail,
                timestamp: now - Duration::seconds(offset),
            }
        })
        .collect()
}

//! Triage report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The remediation path chosen for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageDecision {
    /// File a follow-up issue.
    CreateIssue,
    /// Open an incident immediately.
    StartIncident,
    /// Hand off to a safe automated remediation.
    AutoFix,
}

impl TriageDecision {
    /// Returns the decision as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateIssue => "create_issue",
            Self::StartIncident => "start_incident",
            Self::AutoFix => "auto_fix",
        }
    }
}

impl std::fmt::Display for TriageDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How confident the reviewer is in its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Low confidence.
    Low,
    /// Medium confidence.
    Medium,
    /// High confidence.
    High,
}

impl Confidence {
    /// Returns the confidence as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase names of the review timeline, in the order they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelinePhase {
    /// The alert was ingested.
    Received,
    /// Surrounding context was correlated.
    Context,
    /// A root cause was derived.
    Analysis,
    /// A decision was taken.
    Decision,
}

impl TimelinePhase {
    /// Returns the phase as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Context => "context",
            Self::Analysis => "analysis",
            Self::Decision => "decision",
        }
    }
}

impl std::fmt::Display for TimelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a review timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    /// Which phase this entry records.
    pub phase: TimelinePhase,
    /// Human-readable detail.
    pub detail: String,
    /// When the phase happened.
    pub timestamp: DateTime<Utc>,
}

/// The outcome of reviewing an alert.
///
/// `issue_title` is non-empty exactly when the decision is
/// [`TriageDecision::CreateIssue`]; `auto_fix_plan` is non-empty exactly when
/// it is [`TriageDecision::AutoFix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageReport {
    /// One-line summary of the decision.
    pub summary: String,
    /// Most likely root cause.
    pub likely_root_cause: String,
    /// Standard operational checks to run.
    pub suggested_actions: Vec<String>,
    /// The chosen remediation path.
    pub decision: TriageDecision,
    /// Follow-up issue title.
    #[serde(default)]
    pub issue_title: String,
    /// Ordered automation steps.
    #[serde(default)]
    pub auto_fix_plan: Vec<String>,
    /// Ordered review timeline.
    pub timeline: Vec<TimelineStep>,
    /// Reviewer confidence.
    pub confidence: Confidence,
    /// When the review finished.
    pub reviewed_at: DateTime<Utc>,
}

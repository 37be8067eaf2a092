//! Ordered rule tables used by the heuristic reviewer.
//!
//! Both tables are evaluated front to back and the **last** matching rule
//! wins. Order therefore encodes precedence: a rule later in the table
//! overrides every earlier one whose predicate also held.
//!
//! Decision table (standard order):
//!
//! | # | Rule | Predicate | Decision |
//! |---|------|-----------|----------|
//! | 1 | `baseline` | always | `create_issue` |
//! | 2 | `high_risk` | critical, or description mentions "customer" | `start_incident` |
//! | 3 | `retryable` | warning, and description mentions "retry" | `auto_fix` |
//!
//! Because `retryable` comes last, a warning whose description mentions both
//! "customer" and "retry" is routed to `auto_fix`, not `start_incident`.

use vigil_types::{Alert, AlertSeverity, TriageDecision};

/// Root cause reported when no rule has anything better to say.
pub const DEFAULT_ROOT_CAUSE: &str = "Insufficient telemetry for root-cause confidence";

/// Root cause reported for timeout-shaped descriptions.
pub const TIMEOUT_ROOT_CAUSE: &str = "Downstream dependency timeout causing user impact";

/// Summary for the baseline `create_issue` outcome.
pub const CREATE_ISSUE_SUMMARY: &str = "Alert reviewed; routed for follow-up issue triage";

/// Summary for the `start_incident` outcome.
pub const START_INCIDENT_SUMMARY: &str =
    "High-risk customer impact detected; incident response should start now";

/// Summary for the `auto_fix` outcome.
pub const AUTO_FIX_SUMMARY: &str = "Alert appears remediable via safe automation";

/// Remediation steps attached to every `auto_fix` outcome.
pub const AUTO_FIX_PLAN: [&str; 3] = [
    "Scale workers for affected queue by +20%",
    "Invalidate stale cache entries for impacted route",
    "Monitor recovery for 15 minutes before resolving",
];

/// The classification part of a triage report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    /// The chosen remediation path.
    pub decision: TriageDecision,
    /// One-line summary.
    pub summary: String,
    /// Follow-up issue title; empty unless the decision is `create_issue`.
    pub issue_title: String,
    /// Automation steps; empty unless the decision is `auto_fix`.
    pub auto_fix_plan: Vec<String>,
}

/// A named `(predicate, outcome)` pair.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRule {
    name: &'static str,
    predicate: fn(&Alert) -> bool,
    outcome: fn(&Alert) -> DecisionOutcome,
}

impl DecisionRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(
        name: &'static str,
        predicate: fn(&Alert) -> bool,
        outcome: fn(&Alert) -> DecisionOutcome,
    ) -> Self {
        Self {
            name,
            predicate,
            outcome,
        }
    }

    /// Returns the rule name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if the rule's predicate holds for `alert`.
    #[must_use]
    pub fn applies(&self, alert: &Alert) -> bool {
        (self.predicate)(alert)
    }

    /// Builds the rule's outcome for `alert`.
    #[must_use]
    pub fn outcome(&self, alert: &Alert) -> DecisionOutcome {
        (self.outcome)(alert)
    }
}

/// Ordered decision rules evaluated with last-match-wins semantics.
#[derive(Debug, Clone)]
pub struct DecisionRules {
    rules: Vec<DecisionRule>,
}

impl DecisionRules {
    /// The rule every alert matches.
    pub const BASELINE: DecisionRule = DecisionRule::new("baseline", |_| true, create_issue);

    /// Critical alerts and descriptions mentioning customers.
    pub const HIGH_RISK: DecisionRule =
        DecisionRule::new("high_risk", is_high_risk, start_incident);

    /// Warnings whose description mentions retries.
    pub const RETRYABLE: DecisionRule = DecisionRule::new("retryable", is_retryable, auto_fix);

    /// Returns the standard table: baseline, high risk, retryable.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rules: vec![Self::BASELINE, Self::HIGH_RISK, Self::RETRYABLE],
        }
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[DecisionRule] {
        &self.rules
    }

    /// Returns the last rule whose predicate holds.
    #[must_use]
    pub fn winning_rule(&self, alert: &Alert) -> Option<&DecisionRule> {
        self.rules.iter().rev().find(|rule| rule.applies(alert))
    }

    /// Evaluates the table; falls back to the baseline when nothing matches.
    #[must_use]
    pub fn evaluate(&self, alert: &Alert) -> DecisionOutcome {
        self.winning_rule(alert)
            .unwrap_or(&Self::BASELINE)
            .outcome(alert)
    }
}

impl Default for DecisionRules {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_high_risk(alert: &Alert) -> bool {
    alert.severity == AlertSeverity::Critical || alert.description_mentions("customer")
}

fn is_retryable(alert: &Alert) -> bool {
    alert.severity == AlertSeverity::Warning && alert.description_mentions("retry")
}

fn create_issue(alert: &Alert) -> DecisionOutcome {
    DecisionOutcome {
        decision: TriageDecision::CreateIssue,
        summary: CREATE_ISSUE_SUMMARY.to_string(),
        issue_title: format!("Follow-up: {} ({})", alert.title, alert.severity),
        auto_fix_plan: Vec::new(),
    }
}

fn start_incident(_alert: &Alert) -> DecisionOutcome {
    DecisionOutcome {
        decision: TriageDecision::StartIncident,
        summary: START_INCIDENT_SUMMARY.to_string(),
        issue_title: String::new(),
        auto_fix_plan: Vec::new(),
    }
}

fn auto_fix(_alert: &Alert) -> DecisionOutcome {
    DecisionOutcome {
        decision: TriageDecision::AutoFix,
        summary: AUTO_FIX_SUMMARY.to_string(),
        issue_title: String::new(),
        auto_fix_plan: AUTO_FIX_PLAN.iter().map(ToString::to_string).collect(),
    }
}

/// A named root-cause derivation; `None` means the rule has no opinion.
#[derive(Debug, Clone, Copy)]
pub struct RootCauseRule {
    name: &'static str,
    derive: fn(&Alert) -> Option<String>,
}

impl RootCauseRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(name: &'static str, derive: fn(&Alert) -> Option<String>) -> Self {
        Self { name, derive }
    }

    /// Returns the rule name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the rule against `alert`.
    #[must_use]
    pub fn derive(&self, alert: &Alert) -> Option<String> {
        (self.derive)(alert)
    }
}

/// Ordered root-cause rules evaluated with last-match-wins semantics.
#[derive(Debug, Clone)]
pub struct RootCauseRules {
    rules: Vec<RootCauseRule>,
}

impl RootCauseRules {
    /// Names the anomalous metric from the `metric` label.
    pub const METRIC_ANOMALY: RootCauseRule = RootCauseRule::new("metric_anomaly", |alert| {
        alert.metric().map(|metric| {
            format!("Anomaly detected in metric {metric:?}; likely saturation/regression")
        })
    });

    /// Timeouts in the description override any metric hint.
    pub const TIMEOUT: RootCauseRule = RootCauseRule::new("timeout", |alert| {
        alert
            .description_mentions("timeout")
            .then(|| TIMEOUT_ROOT_CAUSE.to_string())
    });

    /// Returns the standard table: metric anomaly, then timeout.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rules: vec![Self::METRIC_ANOMALY, Self::TIMEOUT],
        }
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[RootCauseRule] {
        &self.rules
    }

    /// Evaluates the table, falling back to [`DEFAULT_ROOT_CAUSE`].
    #[must_use]
    pub fn evaluate(&self, alert: &Alert) -> String {
        self.rules
            .iter()
            .rev()
            .find_map(|rule| rule.derive(alert))
            .unwrap_or_else(|| DEFAULT_ROOT_CAUSE.to_string())
    }
}

impl Default for RootCauseRules {
    fn default() -> Self {
        Self::standard()
    }
}

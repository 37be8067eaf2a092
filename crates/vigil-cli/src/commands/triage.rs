//! Dry-run triage: review an alert without touching the store.

use std::io::Write;

use chrono::Utc;
use vigil_triage::{HeuristicAgent, TriageAgent};
use vigil_types::AlertId;

use crate::cli::AlertInput;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for the triage command.
#[derive(Debug, Default)]
pub struct TriageCommand {
    agent: HeuristicAgent,
}

impl TriageCommand {
    /// Creates a triage command using the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reviews the alert and prints the report.
    ///
    /// # Errors
    ///
    /// Returns error if the alert input is invalid.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        input: &AlertInput,
    ) -> Result<(), CliError> {
        // never stored, so the id is a placeholder
        let alert = input
            .to_request()?
            .normalize()
            .into_alert(AlertId::new(0), Utc::now());
        let report = self.agent.review(&alert);
        format.write(out, &report)
    }
}

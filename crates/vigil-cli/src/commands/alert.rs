//! Alert command implementation.
//!
//! `alert create` runs the full intake: store, triage, and open an incident
//! when the review calls for one.

use std::io::Write;
use std::sync::Arc;

use vigil_incidents::IncidentOrchestrator;
use vigil_store::AlertRepository;

use crate::cli::{AlertCommands, AlertInput};
use crate::error::CliError;
use crate::output::{AlertList, OutputFormat};

/// Handler for alert subcommands.
pub struct AlertCommand {
    store: Arc<dyn AlertRepository>,
}

impl AlertCommand {
    /// Creates a new alert command handler.
    #[must_use]
    pub fn new(store: Arc<dyn AlertRepository>) -> Self {
        Self { store }
    }

    /// Executes the alert subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &AlertCommands,
    ) -> Result<(), CliError> {
        match command {
            AlertCommands::Create(input) => self.create(out, format, input),
            AlertCommands::List => self.list(out, format),
        }
    }

    fn create<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        input: &AlertInput,
    ) -> Result<(), CliError> {
        let request = input.to_request()?;
        let orchestrator = IncidentOrchestrator::new(Arc::clone(&self.store));
        let outcome = orchestrator.handle_create_alert(request)?;
        format.write(out, &outcome)
    }

    fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let list = AlertList {
            alerts: self.store.alerts()?,
        };
        format.write(out, &list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use vigil_store::MemoryStore;
    use vigil_types::{AlertSeverity, AlertStatus};

    fn input(severity: AlertSeverity, description: &str) -> AlertInput {
        AlertInput {
            file: None,
            title: Some("Checkout errors".to_string()),
            description: Some(description.to_string()),
            severity,
            source: None,
            labels: vec!["service=payments".to_string()],
        }
    }

    #[test]
    fn create_persists_and_opens_incident() {
        let store = MemoryStore::new();
        let cmd = AlertCommand::new(Arc::new(store.clone()));
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::new(Format::Json),
            &AlertCommands::Create(input(AlertSeverity::Critical, "upstream timeout")),
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["alert"]["status"], "incident_open");
        assert_eq!(json["incident"]["service"], "payments");
        assert_eq!(store.alerts().unwrap()[0].status, AlertStatus::IncidentOpen);
    }

    #[test]
    fn list_shows_stored_alerts() {
        let store = MemoryStore::new();
        let cmd = AlertCommand::new(Arc::new(store));
        let format = OutputFormat::new(Format::Table);
        let mut sink = Vec::new();
        cmd.execute(
            &mut sink,
            &format,
            &AlertCommands::Create(input(AlertSeverity::Info, "nightly batch slow")),
        )
        .unwrap();

        let mut out = Vec::new();
        cmd.execute(&mut out, &format, &AlertCommands::List).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("alt-000001"));
        assert!(text.contains("create_issue"));
    }
}

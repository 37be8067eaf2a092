//! Incident command implementation.

use std::io::Write;
use std::sync::Arc;

use tracing::info;
use vigil_store::AlertRepository;
use vigil_types::{IncidentId, IncidentStatus};

use crate::cli::IncidentCommands;
use crate::error::CliError;
use crate::output::{IncidentList, OutputFormat};

/// Handler for incident subcommands.
pub struct IncidentCommand {
    store: Arc<dyn AlertRepository>,
}

impl IncidentCommand {
    /// Creates a new incident command handler.
    #[must_use]
    pub fn new(store: Arc<dyn AlertRepository>) -> Self {
        Self { store }
    }

    /// Executes the incident subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the id is malformed or the store call fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &IncidentCommands,
    ) -> Result<(), CliError> {
        match command {
            IncidentCommands::List => {
                let list = IncidentList {
                    incidents: self.store.incidents()?,
                };
                format.write(out, &list)
            }
            IncidentCommands::Resolve { id } => {
                self.set_status(out, format, id, IncidentStatus::Resolved)
            }
            IncidentCommands::Status { id, status } => {
                let status = status.trim();
                if status.is_empty() {
                    return Err(CliError::InvalidArgument(
                        "incident status cannot be empty".to_string(),
                    ));
                }
                self.set_status(out, format, id, IncidentStatus::from(status.to_string()))
            }
        }
    }

    fn set_status<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        id: &str,
        status: IncidentStatus,
    ) -> Result<(), CliError> {
        let id: IncidentId = id.parse()?;
        let incident = self.store.update_incident_status(id, status)?;
        info!(incident_id = %incident.id, status = %incident.status, "incident status updated");
        format.write(out, &incident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use vigil_store::{MemoryStore, StoreError};
    use vigil_types::{AlertId, AlertSeverity, NewIncident};

    fn seeded() -> (MemoryStore, IncidentId) {
        let store = MemoryStore::new();
        let incident = store
            .create_incident(NewIncident {
                alert_id: AlertId::new(1),
                service: "payments".to_string(),
                title: "Checkout down".to_string(),
                severity: AlertSeverity::Critical,
                status: IncidentStatus::Investigating,
                status_page_url: "/status/alt-000001".to_string(),
                created_at: None,
                resolved_at: None,
            })
            .unwrap();
        (store, incident.id)
    }

    #[test]
    fn resolve_stamps_resolved_at() {
        let (store, id) = seeded();
        let cmd = IncidentCommand::new(Arc::new(store.clone()));
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::new(Format::Json),
            &IncidentCommands::Resolve { id: id.to_string() },
        )
        .unwrap();

        let stored = &store.incidents().unwrap()[0];
        assert_eq!(stored.status, IncidentStatus::Resolved);
        assert!(stored.resolved_at.is_some());
    }

    #[test]
    fn status_accepts_bare_number_and_custom_status() {
        let (store, id) = seeded();
        let cmd = IncidentCommand::new(Arc::new(store.clone()));
        let mut out = Vec::new();
        cmd.execute(
            &mut out,
            &OutputFormat::default(),
            &IncidentCommands::Status {
                id: id.get().to_string(),
                status: "postmortem".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            store.incidents().unwrap()[0].status,
            IncidentStatus::Other("postmortem".to_string())
        );
    }

    #[test]
    fn unknown_incident_is_store_error() {
        let (store, _) = seeded();
        let cmd = IncidentCommand::new(Arc::new(store));
        let err = cmd
            .execute(
                &mut Vec::new(),
                &OutputFormat::default(),
                &IncidentCommands::Resolve {
                    id: "inc-000099".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Store(StoreError::IncidentNotFound { .. })
        ));
    }

    #[test]
    fn malformed_id_is_parse_error() {
        let (store, _) = seeded();
        let cmd = IncidentCommand::new(Arc::new(store));
        let err = cmd
            .execute(
                &mut Vec::new(),
                &OutputFormat::default(),
                &IncidentCommands::Resolve {
                    id: "inc-abc".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }
}

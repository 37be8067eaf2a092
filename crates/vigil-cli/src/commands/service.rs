//! Service command implementation.

use std::io::Write;
use std::sync::Arc;

use vigil_store::AlertRepository;

use crate::cli::ServiceCommands;
use crate::error::CliError;
use crate::output::{OutputFormat, ServiceList};

/// Handler for service subcommands.
pub struct ServiceCommand {
    store: Arc<dyn AlertRepository>,
}

impl ServiceCommand {
    /// Creates a new service command handler.
    #[must_use]
    pub fn new(store: Arc<dyn AlertRepository>) -> Self {
        Self { store }
    }

    /// Executes the service subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the store call fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ServiceCommands,
    ) -> Result<(), CliError> {
        match command {
            ServiceCommands::List => {
                let list = ServiceList {
                    services: self.store.services()?,
                };
                format.write(out, &list)
            }
            ServiceCommands::Ensure { name } => {
                let service = self.store.ensure_service(name)?;
                format.write(out, &service)
            }
        }
    }
}

//! Status page command implementation.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use vigil_status::{ReportingWindow, StatusPage};
use vigil_store::AlertRepository;

use crate::cli::StatusArgs;
use crate::config::StatusConfig;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for the status command.
pub struct StatusCommand {
    store: Arc<dyn AlertRepository>,
    config: StatusConfig,
}

impl StatusCommand {
    /// Creates a new status command handler.
    #[must_use]
    pub fn new(store: Arc<dyn AlertRepository>, config: StatusConfig) -> Self {
        Self { store, config }
    }

    /// Builds and prints the status page.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &StatusArgs,
    ) -> Result<(), CliError> {
        let now = Utc::now();
        let window = ReportingWindow::from_query(
            args.period_hours.as_deref(),
            self.config.default_period_hours,
            now,
        );
        let services = self.store.services()?;
        let incidents = self.store.incidents()?;

        let page = StatusPage::build(&services, &incidents, window, self.config.overlap, now);
        format.write(out, &page)
    }
}

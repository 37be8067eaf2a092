//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use serde::Serialize;
use vigil_incidents::AlertOutcome;
use vigil_status::StatusPage;
use vigil_types::{Alert, Incident, Service, TriageReport};

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Stored alerts.
#[derive(Debug, Clone, Serialize)]
pub struct AlertList {
    /// Alerts in insertion order.
    pub alerts: Vec<Alert>,
}

impl TableDisplay for AlertList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.alerts.is_empty() {
            writeln!(writer, "No alerts")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<10}  {:<8}  {:<13}  {:<14}  {:<32}",
            "ID", "SEVERITY", "STATUS", "DECISION", "TITLE"
        )?;
        writeln!(writer, "{}", "─".repeat(85))?;

        for alert in &self.alerts {
            let decision = alert
                .triage
                .as_ref()
                .map_or("-", |report| report.decision.as_str());
            writeln!(
                writer,
                "{:<10}  {:<8}  {:<13}  {:<14}  {:<32}",
                alert.id.to_string(),
                alert.severity.as_str(),
                alert.status.as_str(),
                decision,
                truncate(&alert.title, 32)
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} alert(s)", self.alerts.len())?;
        Ok(())
    }
}

/// Stored incidents.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentList {
    /// Incidents in insertion order.
    pub incidents: Vec<Incident>,
}

impl TableDisplay for IncidentList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.incidents.is_empty() {
            writeln!(writer, "No incidents")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<10}  {:<16}  {:<8}  {:<13}  {:<20}  {:<20}",
            "ID", "SERVICE", "SEVERITY", "STATUS", "CREATED", "RESOLVED"
        )?;
        writeln!(writer, "{}", "─".repeat(96))?;

        for incident in &self.incidents {
            writeln!(
                writer,
                "{:<10}  {:<16}  {:<8}  {:<13}  {:<20}  {:<20}",
                incident.id.to_string(),
                truncate(&incident.service, 16),
                incident.severity.as_str(),
                truncate(incident.status.as_str(), 13),
                timestamp(incident.created_at),
                incident.resolved_at.map_or_else(|| "-".to_string(), timestamp)
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} incident(s)", self.incidents.len())?;
        Ok(())
    }
}

/// Registered services.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceList {
    /// Services in insertion order.
    pub services: Vec<Service>,
}

impl TableDisplay for ServiceList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.services.is_empty() {
            writeln!(writer, "No services")?;
            return Ok(());
        }

        writeln!(writer, "{:<10}  {:<24}  {:<20}", "ID", "NAME", "CREATED")?;
        writeln!(writer, "{}", "─".repeat(58))?;
        for service in &self.services {
            writeln!(
                writer,
                "{:<10}  {:<24}  {:<20}",
                service.id.to_string(),
                truncate(&service.name, 24),
                timestamp(service.created_at)
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} service(s)", self.services.len())?;
        Ok(())
    }
}

impl TableDisplay for Service {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Service {}", self.id)?;
        writeln!(writer, "  Name:     {}", self.name)?;
        writeln!(writer, "  Created:  {}", timestamp(self.created_at))?;
        Ok(())
    }
}

impl TableDisplay for Incident {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Incident {}", self.id)?;
        writeln!(writer, "  Title:     {}", self.title)?;
        writeln!(writer, "  Service:   {}", self.service)?;
        writeln!(writer, "  Severity:  {}", self.severity)?;
        writeln!(writer, "  Status:    {}", self.status)?;
        writeln!(writer, "  Alert:     {}", self.alert_id)?;
        writeln!(writer, "  Page:      {}", self.status_page_url)?;
        writeln!(writer, "  Created:   {}", timestamp(self.created_at))?;
        if let Some(resolved_at) = self.resolved_at {
            writeln!(writer, "  Resolved:  {}", timestamp(resolved_at))?;
        }
        Ok(())
    }
}

impl TableDisplay for TriageReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Triage")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Decision:    {}", self.decision)?;
        writeln!(writer, "Confidence:  {}", self.confidence)?;
        writeln!(writer, "Summary:     {}", self.summary)?;
        writeln!(writer, "Root cause:  {}", self.likely_root_cause)?;
        if !self.issue_title.is_empty() {
            writeln!(writer, "Issue:       {}", self.issue_title)?;
        }
        writeln!(writer)?;
        writeln!(writer, "Suggested actions")?;
        for action in &self.suggested_actions {
            writeln!(writer, "  - {action}")?;
        }
        if !self.auto_fix_plan.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Auto-fix plan")?;
            for (i, step) in self.auto_fix_plan.iter().enumerate() {
                writeln!(writer, "  {}. {step}", i + 1)?;
            }
        }
        writeln!(writer)?;
        writeln!(writer, "Timeline")?;
        for step in &self.timeline {
            writeln!(
                writer,
                "  {}  {:<8}  {}",
                timestamp(step.timestamp),
                step.phase.as_str(),
                step.detail
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for AlertOutcome {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Alert {} ({})", self.alert.id, self.alert.status)?;
        writeln!(writer)?;
        if let Some(report) = &self.alert.triage {
            report.write_table(writer)?;
        }
        writeln!(writer)?;
        match &self.incident {
            Some(incident) => incident.write_table(writer)?,
            None => writeln!(writer, "No incident opened")?,
        }
        Ok(())
    }
}

impl TableDisplay for StatusPage {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Status: {}", self.overall_status)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(
            writer,
            "Window:  {} .. {}",
            timestamp(self.period_start),
            timestamp(self.period_end)
        )?;
        writeln!(writer)?;

        if self.services.is_empty() {
            writeln!(writer, "No services")?;
        } else {
            writeln!(
                writer,
                "{:<24}  {:>12}  {:>14}",
                "SERVICE", "AVAILABILITY", "DOWNTIME (MIN)"
            )?;
            writeln!(writer, "{}", "─".repeat(54))?;
            for entry in &self.services {
                writeln!(
                    writer,
                    "{:<24}  {:>11.2}%  {:>14}",
                    truncate(&entry.service, 24),
                    entry.availability_percent,
                    entry.downtime_minutes
                )?;
            }
        }

        if !self.incidents.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Open incidents")?;
            for incident in &self.incidents {
                writeln!(
                    writer,
                    "  {}  [{}] {} ({})",
                    incident.id, incident.severity, incident.title, incident.status
                )?;
                writeln!(writer, "      {}", incident.current_message)?;
            }
        }
        Ok(())
    }
}

fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Truncate a string to a maximum length, adding "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

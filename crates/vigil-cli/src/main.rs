//! Vigil CLI binary entrypoint.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vigil_cli::cli::{Cli, Commands};
use vigil_cli::commands::{
    AlertCommand, IncidentCommand, ServiceCommand, StatusCommand, TriageCommand,
};
use vigil_cli::config::VigilConfig;
use vigil_cli::output::OutputFormat;
use vigil_store::{AlertRepository, FileStore};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match VigilConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_state_dir(cli.state_dir.clone()),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &VigilConfig) -> anyhow::Result<()> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    // dry-run triage never touches the store
    if let Commands::Triage(input) = &cli.command {
        TriageCommand::new().execute(&mut stdout, &format, input)?;
        return Ok(());
    }

    let store: Arc<dyn AlertRepository> = Arc::new(
        FileStore::open(&config.state_dir).with_context(|| {
            format!("failed to open store in '{}'", config.state_dir.display())
        })?,
    );
    debug!(state_dir = %config.state_dir.display(), "store opened");

    match cli.command {
        Commands::Alert { command } => {
            AlertCommand::new(store).execute(&mut stdout, &format, &command)?;
        }
        Commands::Incident { command } => {
            IncidentCommand::new(store).execute(&mut stdout, &format, &command)?;
        }
        Commands::Service { command } => {
            ServiceCommand::new(store).execute(&mut stdout, &format, &command)?;
        }
        Commands::Status(args) => {
            StatusCommand::new(store, config.status.clone()).execute(&mut stdout, &format, &args)?;
        }
        Commands::Triage(_) => {}
    }

    Ok(())
}

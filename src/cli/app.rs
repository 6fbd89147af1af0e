//! Main CLI application structure

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use super::console::Console;
use super::output::Output;
use crate::storage::{Config, FileStorage};

#[derive(Parser)]
#[command(name = "hbnb")]
#[command(author, version, about = "Interactive console for HBnB objects")]
pub struct Cli {
    /// Storage file (overrides the configured one)
    #[arg(long, env = "HBNB_FILE")]
    pub file: Option<PathBuf>,

    /// Configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!("HBnB console starting");

    let config = Config::load(cli.config.as_deref())?;
    let storage_file = cli.file.unwrap_or_else(|| config.storage_file.clone());
    tracing::debug!(path = %storage_file.display(), "Opening storage");

    let storage = FileStorage::open(storage_file)?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut console =
        Console::new(storage, Output::new(io::stdout().lock())).with_prompt(config.prompt);

    console.run(stdin.lock(), interactive)?;

    tracing::debug!("Console exited");
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

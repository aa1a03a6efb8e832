//! align-agents CLI
//!
//! Manages the local rules and MCP definition store and syncs it into the
//! config files of installed AI tools.

mod cli;
mod commands;
mod error;

use align_core::{AppContext, AppPaths, TracingSink};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    align_tools::logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let paths = AppPaths::resolve()?;
    let ctx = AppContext::init(paths, Arc::new(TracingSink))?;
    let backup = cli.backup_options(&ctx.config.sync);

    commands::execute(&ctx, &backup, cli.command)
}

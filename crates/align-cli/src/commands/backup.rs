//! Backup commands

use crate::error::{CliError, Result};
use align_core::{list_backups, restore_latest_backup};
use colored::Colorize;
use std::path::Path;

/// Run `align backup list`
pub fn run_list(path: &Path) -> Result<()> {
    let backups = list_backups(path)?;
    if backups.is_empty() {
        println!("No backups of {}.", path.display());
        return Ok(());
    }

    println!("{} Backups of {}:", "=>".blue().bold(), path.display());
    for backup in &backups {
        println!(
            "   {} {}  {} bytes  {}",
            "-".cyan(),
            backup.timestamp.format("%Y-%m-%d %H:%M:%S"),
            backup.size,
            backup.path.display()
        );
    }
    Ok(())
}

/// Run `align backup restore`
pub fn run_restore(path: &Path) -> Result<()> {
    if !restore_latest_backup(path)? {
        return Err(CliError::user(format!("no backup found for {}", path.display())));
    }
    println!("{} Restored {} from its newest backup.", "OK".green().bold(), path.display());
    Ok(())
}

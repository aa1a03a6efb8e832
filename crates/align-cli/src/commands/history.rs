//! Sync history listing

use super::print_json;
use crate::error::Result;
use align_core::AppContext;
use colored::Colorize;

/// Run `align history`
pub fn run_history(ctx: &AppContext, limit: usize, json: bool) -> Result<()> {
    let entries = ctx.store.list_history(limit)?;
    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No sync history yet.");
        return Ok(());
    }

    for entry in &entries {
        let status = match entry.status.as_str() {
            "success" => entry.status.as_str().green(),
            "error" => entry.status.as_str().red(),
            _ => entry.status.as_str().yellow(),
        };
        println!(
            "{}  {:<5} {:<16} {:<13} {}",
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.kind,
            entry.tool_id,
            status,
            entry.message.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

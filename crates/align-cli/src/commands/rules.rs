//! Rule store commands

use super::print_json;
use crate::error::{CliError, Result};
use align_core::AppContext;
use colored::Colorize;
use std::path::Path;

/// Run `align rules add`
pub fn run_add(
    ctx: &AppContext,
    name: &str,
    content: Option<String>,
    file: Option<&Path>,
    activate: bool,
) -> Result<()> {
    let content = match (content, file) {
        (Some(content), _) => content,
        (None, Some(file)) => std::fs::read_to_string(file)?,
        (None, None) => return Err(CliError::user("either --content or --file is required")),
    };

    let rule = ctx.store.create_rule(name, &content)?;
    if activate {
        ctx.store.set_active_rule(&rule.id)?;
    }

    println!("{} Rule '{}' added: {}", "OK".green().bold(), rule.name, rule.id.cyan());
    Ok(())
}

/// Run `align rules list`
pub fn run_list(ctx: &AppContext, json: bool) -> Result<()> {
    let rules = ctx.store.list_rules()?;
    if json {
        return print_json(&rules);
    }

    if rules.is_empty() {
        println!("No rules stored.");
        return Ok(());
    }

    println!("{} Rules:", "=>".blue().bold());
    for rule in &rules {
        let marker = if rule.is_active { "*".green().bold() } else { "-".cyan() };
        let archived = if rule.is_archived { " (archived)" } else { "" };
        println!("   {} {} {}{}", marker, rule.id.dimmed(), rule.name, archived);
    }
    Ok(())
}

/// Run `align rules activate`
pub fn run_activate(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.store.set_active_rule(id)?;
    println!("{} Rule {} is now active.", "OK".green().bold(), id.cyan());
    Ok(())
}

/// Run `align rules delete`
///
/// Refuses the active rule unless `force` is set.
pub fn run_delete(ctx: &AppContext, id: &str, force: bool) -> Result<()> {
    let active = ctx.store.find_rule(id)?.is_some_and(|rule| rule.is_active);
    if active && !force {
        return Err(CliError::user(format!(
            "rule {id} is the active rule; activate another rule first or pass --force"
        )));
    }

    ctx.store.delete_rule(id)?;
    if active {
        println!("{} Deleted the active rule; no rule is active now.", "WARN".yellow().bold());
    }
    println!("{} Rule {} deleted.", "OK".green().bold(), id.cyan());
    Ok(())
}

//! Per-tool sync settings commands

use super::print_json;
use crate::error::{CliError, Result};
use align_core::AppContext;
use align_meta::ToolMetadata;
use colored::Colorize;
use serde_json::json;

fn find_tool<'a>(ctx: &'a AppContext, id: &str) -> Result<&'a ToolMetadata> {
    ctx.registry
        .get(id)
        .ok_or_else(|| CliError::user(format!("unknown tool '{id}' (see `align tools list`)")))
}

/// Run `align sync-config show`
pub fn run_show(ctx: &AppContext, json: bool) -> Result<()> {
    let mcp = ctx.store.load_mcp_sync_config()?;
    let rules = ctx.store.load_rules_sync_config()?;
    if json {
        return print_json(&json!({ "mcp": mcp, "rules": rules }));
    }

    if mcp.is_empty() && rules.is_empty() {
        println!("No per-tool settings stored; every tool is enabled.");
        return Ok(());
    }

    if !mcp.is_empty() {
        println!("{} MCP:", "=>".blue().bold());
        for (tool, config) in &mcp {
            let state = if config.enabled { "enabled".green() } else { "disabled".yellow() };
            let servers = match &config.servers {
                Some(ids) => ids.join(", "),
                None => "all servers".to_string(),
            };
            println!("   {} {} ({})", tool.cyan(), state, servers.as_str().dimmed());
        }
    }

    if !rules.is_empty() {
        println!("{} Rules:", "=>".blue().bold());
        for (tool, config) in &rules {
            let state = if config.enabled { "enabled".green() } else { "disabled".yellow() };
            let target = match (&config.target_path, config.global) {
                (_, true) => "global".to_string(),
                (Some(path), false) => path.clone(),
                (None, false) => "project".to_string(),
            };
            println!("   {} {} ({})", tool.cyan(), state, target.as_str().dimmed());
        }
    }
    Ok(())
}

/// Run `align sync-config mcp`
///
/// Only the given flags change; other stored settings for the tool stay.
pub fn run_mcp(
    ctx: &AppContext,
    tool_id: &str,
    enabled: Option<bool>,
    servers: Vec<String>,
    all_servers: bool,
) -> Result<()> {
    let tool = find_tool(ctx, tool_id)?;
    if !tool.supports_mcp {
        return Err(CliError::user(format!("tool '{tool_id}' does not take MCP servers")));
    }

    if !servers.is_empty() {
        let pool = ctx.store.list_definitions()?;
        if let Some(missing) = servers.iter().find(|id| !pool.iter().any(|def| def.id == **id)) {
            return Err(CliError::user(format!("no MCP definition with id '{missing}'")));
        }
    }

    let mut configs = ctx.store.load_mcp_sync_config()?;
    let config = configs.entry(tool.id.clone()).or_default();
    if let Some(enabled) = enabled {
        config.enabled = enabled;
    }
    if all_servers {
        config.servers = None;
    } else if !servers.is_empty() {
        config.servers = Some(servers);
    }
    let summary = if config.enabled { "enabled" } else { "disabled" };
    ctx.store.save_mcp_sync_config(&configs)?;

    println!("{} MCP sync for {} is {}.", "OK".green().bold(), tool.id.cyan(), summary);
    Ok(())
}

/// Run `align sync-config rules`
///
/// `--target-path` and `--global` replace each other.
pub fn run_rules(
    ctx: &AppContext,
    tool_id: &str,
    target_path: Option<String>,
    global: bool,
    enabled: Option<bool>,
) -> Result<()> {
    let tool = find_tool(ctx, tool_id)?;
    if !tool.supports_rules() {
        return Err(CliError::user(format!("tool '{tool_id}' has no rules file")));
    }

    let mut configs = ctx.store.load_rules_sync_config()?;
    let config = configs.entry(tool.id.clone()).or_default();
    if let Some(enabled) = enabled {
        config.enabled = enabled;
    }
    if let Some(path) = target_path {
        config.target_path = Some(path);
        config.global = false;
    } else if global {
        config.target_path = None;
        config.global = true;
    }
    let summary = if config.enabled { "enabled" } else { "disabled" };
    ctx.store.save_rules_sync_config(&configs)?;

    println!("{} Rules sync for {} is {}.", "OK".green().bold(), tool.id.cyan(), summary);
    Ok(())
}

//! Sync commands
//!
//! Single-tool syncs fail the command on error. Batch syncs report every
//! tool, record one history entry per tool and fail the command only after
//! all tools were attempted.

use super::{print_json, resolve_strategy};
use crate::error::{CliError, Result};
use align_core::{
    AppContext, BackupOptions, McpSyncResult, McpSyncStatus, RulesSyncResult, RulesSyncStatus,
};
use align_meta::SyncKind;
use colored::{ColoredString, Colorize};
use std::path::Path;

/// The explicit rule id, or the active rule's.
fn resolve_rule_source(ctx: &AppContext, source: Option<String>) -> Result<String> {
    if let Some(source) = source {
        return Ok(source);
    }
    ctx.store
        .active_rule()?
        .map(|rule| rule.id)
        .ok_or_else(|| CliError::user("no --source given and no rule is active"))
}

fn record(ctx: &AppContext, kind: SyncKind, tool: &str, source: Option<&str>, status: &str, message: Option<&str>) {
    if let Err(e) = ctx.store.record_history(kind, tool, source, status, message) {
        tracing::warn!(tool, error = %e, "Failed to record sync history");
    }
}

fn fail_on_errors(failed: usize) -> Result<()> {
    match failed {
        0 => Ok(()),
        n => Err(CliError::user(format!("{n} tool(s) failed to sync"))),
    }
}

/// Run `align sync rules`
pub fn run_rules(
    ctx: &AppContext,
    backup: &BackupOptions,
    tool: &str,
    project: Option<&Path>,
    global: bool,
    strategy: Option<&str>,
    source: Option<String>,
) -> Result<()> {
    let strategy = resolve_strategy(ctx, strategy)?;
    let source = resolve_rule_source(ctx, source)?;

    println!("{} Syncing rules to {} ({})", "=>".blue().bold(), tool.cyan(), strategy);
    let path = ctx
        .rule_syncer()
        .with_backup_options(*backup)
        .sync_tool_rules(tool, project, global, strategy, None, &source)?;

    println!("{} Wrote {}", "OK".green().bold(), path.display());
    Ok(())
}

fn rules_status(status: RulesSyncStatus) -> ColoredString {
    match status {
        RulesSyncStatus::Success => "OK".green().bold(),
        RulesSyncStatus::Skipped | RulesSyncStatus::NotSupported => "SKIP".yellow().bold(),
        RulesSyncStatus::Error => "FAIL".red().bold(),
    }
}

/// Run `align sync rules-all`
pub fn run_rules_all(
    ctx: &AppContext,
    backup: &BackupOptions,
    project: Option<&Path>,
    strategy: Option<&str>,
    source: Option<String>,
    json: bool,
) -> Result<()> {
    let strategy = resolve_strategy(ctx, strategy)?;
    let source = resolve_rule_source(ctx, source)?;

    let results: Vec<RulesSyncResult> = ctx
        .rule_syncer()
        .with_backup_options(*backup)
        .sync_all_tools_rules(project, strategy, &source);

    for result in &results {
        record(
            ctx,
            SyncKind::Rules,
            &result.tool_id,
            Some(&source),
            result.status.as_str(),
            result.message.as_deref(),
        );
    }

    if json {
        print_json(&results)?;
    } else {
        println!("{} Rules sync ({})", "=>".blue().bold(), strategy);
        for result in &results {
            let detail = match (&result.target_path, &result.message) {
                (Some(path), _) => path.display().to_string(),
                (None, Some(message)) => message.clone(),
                (None, None) => String::new(),
            };
            println!("   {:<4} {:<16} {}", rules_status(result.status), result.tool_id, detail);
        }
    }

    fail_on_errors(
        results
            .iter()
            .filter(|r| r.status == RulesSyncStatus::Error)
            .count(),
    )
}

/// Run `align sync mcp`
pub fn run_mcp(
    ctx: &AppContext,
    backup: &BackupOptions,
    tool: &str,
    config: Option<&Path>,
    strategy: Option<&str>,
    source: Option<&str>,
    servers: Vec<String>,
) -> Result<()> {
    let strategy = resolve_strategy(ctx, strategy)?;
    let server_ids = (!servers.is_empty()).then_some(servers.as_slice());

    println!("{} Syncing MCP servers to {} ({})", "=>".blue().bold(), tool.cyan(), strategy);
    let applied = ctx
        .mcp_syncer()
        .with_backup_options(*backup)
        .sync_tool_mcp(tool, config, server_ids, strategy, None, source)?;

    if applied.is_empty() {
        println!("{} No servers to sync; the server map was still written.", "WARN".yellow().bold());
    }
    for name in &applied {
        println!("   {} {}", "-".cyan(), name);
    }
    println!("{} Synced {} server(s).", "OK".green().bold(), applied.len());
    Ok(())
}

fn mcp_status(status: McpSyncStatus) -> ColoredString {
    match status {
        McpSyncStatus::Success => "OK".green().bold(),
        McpSyncStatus::Skipped | McpSyncStatus::Unsupported => "SKIP".yellow().bold(),
        McpSyncStatus::Error => "FAIL".red().bold(),
    }
}

/// Run `align sync mcp-all`
pub fn run_mcp_all(
    ctx: &AppContext,
    backup: &BackupOptions,
    source: Option<&str>,
    strategy: Option<&str>,
    json: bool,
) -> Result<()> {
    let strategy = resolve_strategy(ctx, strategy)?;

    let results: Vec<McpSyncResult> = ctx
        .mcp_syncer()
        .with_strategy(strategy)
        .with_backup_options(*backup)
        .sync_all_tools(source, None);

    for result in &results {
        record(
            ctx,
            SyncKind::Mcp,
            &result.tool_id,
            source,
            result.status.as_str(),
            result.message.as_deref(),
        );
    }

    if json {
        print_json(&results)?;
    } else {
        println!("{} MCP sync ({})", "=>".blue().bold(), strategy);
        for result in &results {
            let detail = match result.status {
                McpSyncStatus::Success => result.servers.join(", "),
                McpSyncStatus::Unsupported => "MCP not supported".to_string(),
                _ => result.message.clone().unwrap_or_default(),
            };
            println!("   {:<4} {:<16} {}", mcp_status(result.status), result.tool_id, detail);
        }
    }

    fail_on_errors(
        results
            .iter()
            .filter(|r| r.status == McpSyncStatus::Error)
            .count(),
    )
}

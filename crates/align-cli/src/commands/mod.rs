//! Command implementations for align-cli

pub mod backup;
pub mod history;
pub mod mcp;
pub mod rules;
pub mod sync;
pub mod sync_config;
pub mod tools;

use crate::cli::{
    BackupAction, Commands, McpAction, RulesAction, SyncAction, SyncConfigAction, ToolsAction,
};
use crate::error::Result;
use align_blocks::SyncStrategy;
use align_core::{AppContext, BackupOptions};
use serde::Serialize;

/// Dispatch a parsed command.
pub fn execute(ctx: &AppContext, backup: &BackupOptions, command: Commands) -> Result<()> {
    match command {
        Commands::Tools {
            action: ToolsAction::List { json },
        } => tools::run_list(ctx, json),

        Commands::Rules { action } => match action {
            RulesAction::Add {
                name,
                content,
                file,
                activate,
            } => rules::run_add(ctx, &name, content, file.as_deref(), activate),
            RulesAction::List { json } => rules::run_list(ctx, json),
            RulesAction::Activate { id } => rules::run_activate(ctx, &id),
            RulesAction::Delete { id, force } => rules::run_delete(ctx, &id, force),
        },

        Commands::Mcp { action } => match action {
            McpAction::DefAdd(args) => mcp::run_def_add(ctx, args),
            McpAction::DefList { json } => mcp::run_def_list(ctx, json),
            McpAction::DefDelete { id } => mcp::run_def_delete(ctx, &id),
            McpAction::SetCreate {
                name,
                description,
                servers,
                disabled,
                activate,
            } => mcp::run_set_create(ctx, &name, description.as_deref(), servers, disabled, activate),
            McpAction::SetList { json } => mcp::run_set_list(ctx, json),
            McpAction::SetActivate { id } => mcp::run_set_activate(ctx, &id),
        },

        Commands::Sync { action } => match action {
            SyncAction::Rules {
                tool,
                project,
                global,
                strategy,
                source,
            } => sync::run_rules(
                ctx,
                backup,
                &tool,
                project.as_deref(),
                global,
                strategy.as_deref(),
                source,
            ),
            SyncAction::RulesAll {
                project,
                strategy,
                source,
                json,
            } => sync::run_rules_all(ctx, backup, project.as_deref(), strategy.as_deref(), source, json),
            SyncAction::Mcp {
                tool,
                config,
                strategy,
                source,
                servers,
            } => sync::run_mcp(
                ctx,
                backup,
                &tool,
                config.as_deref(),
                strategy.as_deref(),
                source.as_deref(),
                servers,
            ),
            SyncAction::McpAll {
                source,
                strategy,
                json,
            } => sync::run_mcp_all(ctx, backup, source.as_deref(), strategy.as_deref(), json),
        },

        Commands::SyncConfig { action } => match action {
            SyncConfigAction::Show { json } => sync_config::run_show(ctx, json),
            SyncConfigAction::Mcp {
                tool,
                enable,
                disable,
                servers,
                all_servers,
            } => sync_config::run_mcp(ctx, &tool, enabled_flag(enable, disable), servers, all_servers),
            SyncConfigAction::Rules {
                tool,
                target_path,
                global,
                enable,
                disable,
            } => sync_config::run_rules(ctx, &tool, target_path, global, enabled_flag(enable, disable)),
        },

        Commands::Backup { action } => match action {
            BackupAction::List { path } => backup::run_list(&path),
            BackupAction::Restore { path } => backup::run_restore(&path),
        },

        Commands::History { limit, json } => history::run_history(ctx, limit, json),
    }
}

/// `--enable`/`--disable` as a change, `None` when neither was given.
fn enabled_flag(enable: bool, disable: bool) -> Option<bool> {
    match (enable, disable) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Parse `--strategy`, falling back to the configured default.
pub(crate) fn resolve_strategy(ctx: &AppContext, tag: Option<&str>) -> Result<SyncStrategy> {
    match tag {
        Some(tag) => Ok(tag.parse()?),
        None => Ok(ctx.config.sync.default_strategy),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

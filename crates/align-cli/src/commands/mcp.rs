//! MCP definition and set commands

use super::print_json;
use crate::cli::DefAddArgs;
use crate::error::{CliError, Result};
use align_core::AppContext;
use align_meta::{McpDefinition, McpSetItem, McpTransport};
use colored::Colorize;
use std::collections::BTreeMap;

/// Parse repeated `KEY=VALUE` options.
fn parse_env(pairs: &[String]) -> Result<Option<BTreeMap<String, String>>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(CliError::user(format!("invalid --env '{pair}', expected KEY=VALUE"))),
        })
        .collect::<Result<BTreeMap<_, _>>>()
        .map(Some)
}

fn definition_from_args(args: DefAddArgs) -> Result<McpDefinition> {
    let transport = match (args.command, args.url) {
        (Some(command), None) => McpTransport::Stdio {
            command,
            args: args.args,
            cwd: args.cwd,
        },
        (None, Some(url)) if args.sse => McpTransport::Sse { url, headers: None },
        (None, Some(url)) => McpTransport::Http { url, headers: None },
        _ => return Err(CliError::user("give exactly one of --command or --url")),
    };

    Ok(McpDefinition {
        id: String::new(),
        name: args.name,
        transport,
        description: args.description,
        env: parse_env(&args.env)?,
    })
}

/// Run `align mcp def-add`
pub fn run_def_add(ctx: &AppContext, args: DefAddArgs) -> Result<()> {
    let def = ctx.store.create_definition(definition_from_args(args)?)?;
    println!(
        "{} Definition '{}' ({}) added: {}",
        "OK".green().bold(),
        def.name,
        def.transport.type_tag(),
        def.id.cyan()
    );
    Ok(())
}

/// Run `align mcp def-list`
pub fn run_def_list(ctx: &AppContext, json: bool) -> Result<()> {
    let defs = ctx.store.list_definitions()?;
    if json {
        return print_json(&defs);
    }

    if defs.is_empty() {
        println!("No MCP definitions stored.");
        return Ok(());
    }

    println!("{} MCP definitions:", "=>".blue().bold());
    for def in &defs {
        let target = match &def.transport {
            McpTransport::Stdio { command, args, .. } => {
                std::iter::once(command.as_str())
                    .chain(args.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            McpTransport::Http { url, .. } | McpTransport::Sse { url, .. } => url.clone(),
        };
        println!(
            "   {} {} {:<20} {:<5} {}",
            "-".cyan(),
            def.id.dimmed(),
            def.name,
            def.transport.type_tag(),
            target
        );
    }
    Ok(())
}

/// Run `align mcp def-delete`
pub fn run_def_delete(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.store.delete_definition(id)?;
    println!("{} Definition {} deleted.", "OK".green().bold(), id.cyan());
    Ok(())
}

/// Run `align mcp set-create`
pub fn run_set_create(
    ctx: &AppContext,
    name: &str,
    description: Option<&str>,
    servers: Vec<String>,
    disabled: Vec<String>,
    activate: bool,
) -> Result<()> {
    for id in servers.iter().chain(&disabled) {
        if ctx.store.find_definition(id)?.is_none() {
            return Err(CliError::user(format!("no MCP definition with id '{id}'")));
        }
    }

    let items = servers
        .into_iter()
        .map(McpSetItem::enabled)
        .chain(disabled.into_iter().map(McpSetItem::disabled))
        .collect();
    let set = ctx.store.create_set(name, description, items)?;
    if activate {
        ctx.store.set_active_set(&set.id)?;
    }

    println!(
        "{} Set '{}' created with {} server(s): {}",
        "OK".green().bold(),
        set.name,
        set.items.len(),
        set.id.cyan()
    );
    Ok(())
}

/// Run `align mcp set-list`
pub fn run_set_list(ctx: &AppContext, json: bool) -> Result<()> {
    let sets = ctx.store.list_sets()?;
    if json {
        return print_json(&sets);
    }

    if sets.is_empty() {
        println!("No MCP sets stored.");
        return Ok(());
    }

    println!("{} MCP sets:", "=>".blue().bold());
    for set in &sets {
        let marker = if set.is_active { "*".green().bold() } else { "-".cyan() };
        println!(
            "   {} {} {} ({} enabled of {})",
            marker,
            set.id.dimmed(),
            set.name,
            set.enabled_server_ids().count(),
            set.items.len()
        );
    }
    Ok(())
}

/// Run `align mcp set-activate`
pub fn run_set_activate(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.store.set_active_set(id)?;
    println!("{} Set {} is now active.", "OK".green().bold(), id.cyan());
    Ok(())
}

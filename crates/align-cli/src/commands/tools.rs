//! Tool registry listing

use super::print_json;
use crate::error::Result;
use align_core::AppContext;
use align_tools::ToolDetector;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'static str,
    format: &'static str,
    supports_mcp: bool,
    supports_rules: bool,
    config_path: Option<PathBuf>,
}

/// Run `align tools list`
pub fn run_list(ctx: &AppContext, json: bool) -> Result<()> {
    let detected = ToolDetector::new().detect(&ctx.registry);

    let rows: Vec<ToolRow<'_>> = ctx
        .registry
        .iter()
        .map(|tool| ToolRow {
            id: &tool.id,
            name: &tool.name,
            category: tool.category.as_str(),
            format: tool.format.as_str(),
            supports_mcp: tool.supports_mcp,
            supports_rules: tool.supports_rules(),
            config_path: detected
                .iter()
                .find(|d| d.id == tool.id)
                .and_then(|d| d.config_path.clone()),
        })
        .collect();

    if json {
        return print_json(&rows);
    }

    println!("{} Registered tools:", "=>".blue().bold());
    for row in &rows {
        let mut features = Vec::new();
        if row.supports_rules {
            features.push("rules");
        }
        if row.supports_mcp {
            features.push("mcp");
        }
        let status = match &row.config_path {
            Some(path) => format!("found {}", path.display()).as_str().green(),
            None => "not installed".dimmed(),
        };
        println!(
            "   {} {:<16} {:<10} [{}] {}",
            "-".cyan(),
            row.id,
            row.category,
            features.join(", "),
            status
        );
    }
    Ok(())
}

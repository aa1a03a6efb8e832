//! Built-in tool metadata
//!
//! Paths use `~` and are expanded when the registry is loaded.

use align_meta::{ToolCategory, ToolFormat, ToolMetadata};

/// Number of built-in tools.
pub const BUILTIN_COUNT: usize = 8;

fn tool(id: &str, name: &str, category: ToolCategory, config_paths: &[&str]) -> ToolMetadata {
    let mut meta = ToolMetadata::new(id, name);
    meta.category = category;
    meta.config_paths = config_paths.iter().map(|p| p.to_string()).collect();
    meta.supports_mcp = true;
    meta
}

fn with_rules(mut meta: ToolMetadata, filename: &str, global_dir: Option<&str>) -> ToolMetadata {
    meta.rules_filename = Some(filename.to_string());
    meta.global_rules_dir = global_dir.map(String::from);
    meta
}

/// All built-in tools, in registry order.
pub fn builtin_tools() -> Vec<ToolMetadata> {
    let mut claude_code = with_rules(
        tool("claude-code", "Claude Code", ToolCategory::CliAgent, &["~/.claude.json"]),
        "CLAUDE.md",
        Some("~/.claude"),
    );
    claude_code.cli_command = Some("claude".into());

    let mut codex = with_rules(
        tool("codex", "Codex CLI", ToolCategory::CliAgent, &["~/.codex/config.toml"]),
        "AGENTS.md",
        Some("~/.codex"),
    );
    codex.format = ToolFormat::Toml;
    codex.mcp_servers_key = Some("mcp_servers".into());
    codex.cli_command = Some("codex".into());

    let mut gemini = with_rules(
        tool("gemini-cli", "Gemini CLI", ToolCategory::CliAgent, &["~/.gemini/settings.json"]),
        "GEMINI.md",
        Some("~/.gemini"),
    );
    gemini.cli_command = Some("gemini".into());

    let mut qwen = with_rules(
        tool("qwen-code", "Qwen Code", ToolCategory::CliAgent, &["~/.qwen/settings.json"]),
        "QWEN.md",
        Some("~/.qwen"),
    );
    qwen.cli_command = Some("qwen".into());

    let mut cursor = with_rules(
        tool("cursor", "Cursor", ToolCategory::Ide, &["~/.cursor/mcp.json"]),
        ".cursorrules",
        None,
    );
    cursor.app_path = Some("/Applications/Cursor.app".into());

    let mut windsurf = with_rules(
        tool(
            "windsurf",
            "Windsurf",
            ToolCategory::Ide,
            &["~/.codeium/windsurf/mcp_config.json"],
        ),
        ".windsurfrules",
        None,
    );
    windsurf.app_path = Some("/Applications/Windsurf.app".into());

    let mut claude_desktop = tool(
        "claude-desktop",
        "Claude Desktop",
        ToolCategory::Desktop,
        &[
            "~/Library/Application Support/Claude/claude_desktop_config.json",
            "~/.config/Claude/claude_desktop_config.json",
            "~/AppData/Roaming/Claude/claude_desktop_config.json",
        ],
    );
    claude_desktop.app_path = Some("/Applications/Claude.app".into());

    let mut vscode = with_rules(
        tool(
            "vscode",
            "VS Code",
            ToolCategory::Ide,
            &[
                "~/Library/Application Support/Code/User/mcp.json",
                "~/.config/Code/User/mcp.json",
                "~/AppData/Roaming/Code/User/mcp.json",
            ],
        ),
        ".github/copilot-instructions.md",
        None,
    );
    vscode.mcp_servers_key = Some("servers".into());
    vscode.cli_command = Some("code".into());

    vec![
        claude_code,
        codex,
        gemini,
        qwen,
        cursor,
        windsurf,
        claude_desktop,
        vscode,
    ]
}

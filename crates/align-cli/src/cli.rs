//! CLI argument parsing using clap derive

use align_core::{BackupOptions, SyncSettings};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// align-agents - Sync rules and MCP servers into your AI tools
#[derive(Parser, Debug)]
#[command(name = "align")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not back up target files before writing them
    #[arg(long, global = true)]
    pub no_backup: bool,

    /// Number of backups to keep per target file
    #[arg(long, global = true, value_name = "N")]
    pub max_backups: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Backup options from `config.toml`, with the global flags applied on top.
    pub fn backup_options(&self, settings: &SyncSettings) -> BackupOptions {
        let mut options = settings.backup_options();
        if let Some(max) = self.max_backups {
            options.max_backups = max;
        }
        if self.no_backup {
            options.skip_backup = true;
        }
        options
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Inspect the tool registry
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },

    /// Manage stored rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Manage MCP server definitions and sets
    Mcp {
        #[command(subcommand)]
        action: McpAction,
    },

    /// Write rules or MCP servers into tool config files
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },

    /// Per-tool settings used by `sync rules-all` and `sync mcp-all`
    SyncConfig {
        #[command(subcommand)]
        action: SyncConfigAction,
    },

    /// List or restore timestamped backups of a file
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Show recent batch sync results
    History {
        /// Maximum number of entries
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ToolsAction {
    /// List registered tools and whether their config was found
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RulesAction {
    /// Store a new rule
    ///
    /// Examples:
    ///   align rules add style --content "Use snake_case."
    ///   align rules add team --file TEAM.md --activate
    Add {
        /// Unique rule name
        name: String,

        /// Rule text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        content: Option<String>,

        /// Read the rule text from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Make this the active rule
        #[arg(long)]
        activate: bool,
    },

    /// List stored rules
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Make a rule the active one
    Activate { id: String },

    /// Delete a rule
    Delete {
        id: String,

        /// Delete the rule even when it is the active one
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum McpAction {
    /// Add a server definition to the pool
    ///
    /// Examples:
    ///   align mcp def-add fs --command npx --arg -y --arg @mcp/fs
    ///   align mcp def-add docs --url https://example.com/mcp
    DefAdd(DefAddArgs),

    /// List server definitions
    DefList {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Delete a server definition
    DefDelete { id: String },

    /// Create a named set of definitions
    SetCreate {
        /// Unique set name
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Definition id to include, in order
        #[arg(long = "server", value_name = "ID")]
        servers: Vec<String>,

        /// Definition id to include but keep disabled
        #[arg(long = "disabled", value_name = "ID")]
        disabled: Vec<String>,

        /// Make this the active set
        #[arg(long)]
        activate: bool,
    },

    /// List sets
    SetList {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Make a set the active one
    SetActivate { id: String },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DefAddArgs {
    /// Server name, used as the key in tool configs
    pub name: String,

    /// Executable for a stdio server
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    pub command: Option<String>,

    /// Argument for the stdio command (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Working directory for the stdio command
    #[arg(long)]
    pub cwd: Option<String>,

    /// URL of a remote server
    #[arg(long)]
    pub url: Option<String>,

    /// Remote server speaks SSE instead of streamable HTTP
    #[arg(long, requires = "url")]
    pub sse: bool,

    /// Environment variable as KEY=VALUE (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Sync a rule into one tool's rules file
    Rules {
        /// Tool id (see `align tools list`)
        #[arg(long)]
        tool: String,

        /// Project directory to write the rules file into
        #[arg(long, conflicts_with = "global", required_unless_present = "global")]
        project: Option<PathBuf>,

        /// Write the tool's global rules file instead
        #[arg(long)]
        global: bool,

        /// `overwrite` or `smart-update`
        #[arg(long)]
        strategy: Option<String>,

        /// Rule id; defaults to the active rule
        #[arg(long)]
        source: Option<String>,
    },

    /// Sync a rule into every rules-capable tool
    RulesAll {
        /// Project directory to write the rules files into
        #[arg(long)]
        project: Option<PathBuf>,

        /// `overwrite` or `smart-update`
        #[arg(long)]
        strategy: Option<String>,

        /// Rule id; defaults to the active rule
        #[arg(long)]
        source: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Sync MCP servers into one tool's config
    Mcp {
        /// Tool id (see `align tools list`)
        #[arg(long)]
        tool: String,

        /// Config file to write instead of the tool's default
        #[arg(long)]
        config: Option<PathBuf>,

        /// `overwrite` or `smart-update`
        #[arg(long)]
        strategy: Option<String>,

        /// Set id to sync
        #[arg(long, conflicts_with = "servers")]
        source: Option<String>,

        /// Definition id to sync (repeatable); all definitions when omitted
        #[arg(long = "server", value_name = "ID")]
        servers: Vec<String>,
    },

    /// Sync MCP servers into every detected tool
    McpAll {
        /// Set id to sync; all definitions when omitted
        #[arg(long)]
        source: Option<String>,

        /// `overwrite` or `smart-update`
        #[arg(long)]
        strategy: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SyncConfigAction {
    /// Show stored per-tool settings
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Set how `sync mcp-all` treats one tool
    ///
    /// Examples:
    ///   align sync-config mcp --tool cursor --disable
    ///   align sync-config mcp --tool codex --server <ID> --server <ID>
    Mcp {
        /// Tool id (see `align tools list`)
        #[arg(long)]
        tool: String,

        /// Include the tool in batch syncs
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Leave the tool out of batch syncs
        #[arg(long)]
        disable: bool,

        /// Definition id to sync to this tool (repeatable)
        #[arg(long = "server", value_name = "ID", conflicts_with = "all_servers")]
        servers: Vec<String>,

        /// Sync every definition to this tool again
        #[arg(long)]
        all_servers: bool,
    },

    /// Set how `sync rules-all` treats one tool
    ///
    /// Examples:
    ///   align sync-config rules --tool codex --global
    ///   align sync-config rules --tool cursor --target-path ~/work/app
    Rules {
        /// Tool id (see `align tools list`)
        #[arg(long)]
        tool: String,

        /// Project directory to write this tool's rules file into
        #[arg(long, value_name = "P", conflicts_with = "global")]
        target_path: Option<String>,

        /// Write this tool's global rules file
        #[arg(long)]
        global: bool,

        /// Include the tool in batch syncs
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Leave the tool out of batch syncs
        #[arg(long)]
        disable: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BackupAction {
    /// List backups of a file, newest first
    List { path: PathBuf },

    /// Restore the newest backup of a file
    Restore { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_rules_global() {
        let cli = Cli::try_parse_from([
            "align", "sync", "rules", "--tool", "codex", "--global", "--source", "r1",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Sync {
                action: SyncAction::Rules {
                    tool: "codex".into(),
                    project: None,
                    global: true,
                    strategy: None,
                    source: Some("r1".into()),
                }
            }
        );
    }

    #[test]
    fn sync_rules_needs_a_target() {
        assert!(Cli::try_parse_from(["align", "sync", "rules", "--tool", "codex"]).is_err());
    }

    #[test]
    fn global_backup_flags_override_settings() {
        let cli = Cli::try_parse_from(["align", "tools", "list", "--no-backup", "--max-backups", "2"])
            .unwrap();
        let options = cli.backup_options(&SyncSettings::default());
        assert!(options.skip_backup);
        assert_eq!(options.max_backups, 2);
    }

    #[test]
    fn def_add_takes_hyphenated_args() {
        let cli = Cli::try_parse_from([
            "align", "mcp", "def-add", "fs", "--command", "npx", "--arg", "-y", "--arg", "fs",
        ])
        .unwrap();
        let Commands::Mcp {
            action: McpAction::DefAdd(args),
        } = cli.command
        else {
            panic!("expected def-add");
        };
        assert_eq!(args.args, vec!["-y", "fs"]);
    }

    #[test]
    fn sync_config_mcp_flags() {
        let cli = Cli::try_parse_from([
            "align", "sync-config", "mcp", "--tool", "codex", "--disable", "--server", "a",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::SyncConfig {
                action: SyncConfigAction::Mcp {
                    tool: "codex".into(),
                    enable: false,
                    disable: true,
                    servers: vec!["a".into()],
                    all_servers: false,
                }
            }
        );
        assert!(
            Cli::try_parse_from(["align", "sync-config", "mcp", "--tool", "x", "--enable", "--disable"])
                .is_err()
        );
    }

    #[test]
    fn sync_config_rules_target_conflicts_with_global() {
        assert!(
            Cli::try_parse_from([
                "align", "sync-config", "rules", "--tool", "x", "--global", "--target-path", "p",
            ])
            .is_err()
        );
    }
}

//! CLI end-to-end tests that invoke the compiled `align` binary.
//!
//! Every test gets its own data directory (`ALIGN_AGENTS_HOME`) and home
//! directory (`HOME`), so tool paths like `~/.codex` land in a temp dir.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    fn data(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("align").expect("Failed to find align binary");
        cmd.env("ALIGN_AGENTS_HOME", self.data())
            .env("HOME", self.home())
            .env_remove("RUST_LOG");
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let out = self.cmd().args(args).output().unwrap();
        assert!(out.status.success(), "{args:?} failed: {}", String::from_utf8_lossy(&out.stderr));
        serde_json::from_slice(&out.stdout).unwrap()
    }

    fn add_rule(&self, name: &str, content: &str) -> String {
        self.cmd()
            .args(["rules", "add", name, "--content", content, "--activate"])
            .assert()
            .success();
        let rules = self.json(&["rules", "list", "--json"]);
        rules
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["name"] == name)
            .map(|r| r["id"].as_str().unwrap().to_string())
            .unwrap()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_help_mentions_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("backup"));
}

#[test]
fn test_tools_list_reports_detection() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.home().join(".claude.json"), "{}").unwrap();

    let tools = sandbox.json(&["tools", "list", "--json"]);
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 8);

    let claude = tools.iter().find(|t| t["id"] == "claude-code").unwrap();
    assert!(claude["configPath"].as_str().unwrap().ends_with(".claude.json"));
    let cursor = tools.iter().find(|t| t["id"] == "cursor").unwrap();
    assert!(cursor["configPath"].is_null());

    sandbox
        .cmd()
        .args(["tools", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("codex"))
        .stdout(predicate::str::contains("not installed"));
}

#[test]
fn test_sync_rules_global_then_backup() {
    let sandbox = Sandbox::new();
    let first = sandbox.add_rule("base", "Prefer small functions.");

    sandbox
        .cmd()
        .args(["sync", "rules", "--tool", "codex", "--global", "--source", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("AGENTS.md"));

    let target = sandbox.home().join(".codex/AGENTS.md");
    assert!(read(&target).contains("Prefer small functions."));

    // Second sync uses the active rule and backs up the first result
    sandbox.add_rule("strict", "Never skip tests.");
    sandbox
        .cmd()
        .args(["sync", "rules", "--tool", "codex", "--global"])
        .assert()
        .success();
    let content = read(&target);
    assert!(content.contains("Never skip tests."));
    assert!(!content.contains("Prefer small functions."));

    sandbox
        .cmd()
        .args(["backup", "list"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("AGENTS.md"));

    sandbox.cmd().args(["backup", "restore"]).arg(&target).assert().success();
    assert!(read(&target).contains("Prefer small functions."));
}

#[test]
fn test_no_backup_flag_skips_backups() {
    let sandbox = Sandbox::new();
    let rule = sandbox.add_rule("base", "One.");
    let project = sandbox.dir.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("CLAUDE.md"), "# Mine\n").unwrap();

    sandbox
        .cmd()
        .args(["--no-backup", "sync", "rules", "--tool", "claude-code", "--source", &rule])
        .arg("--project")
        .arg(&project)
        .assert()
        .success();

    assert!(!project.join(".backup").exists());
    let content = read(&project.join("CLAUDE.md"));
    assert!(content.starts_with("# Mine\n"));
    assert!(content.contains("One."));
}

#[test]
fn test_unknown_strategy_fails() {
    let sandbox = Sandbox::new();
    let rule = sandbox.add_rule("base", "x");

    sandbox
        .cmd()
        .args(["sync", "rules", "--tool", "codex", "--global", "--strategy", "bogus", "--source", &rule])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown sync strategy: bogus"));
}

#[test]
fn test_rules_all_writes_every_rules_tool() {
    let sandbox = Sandbox::new();
    sandbox.add_rule("base", "Shared guidance.");
    let project = sandbox.dir.path().join("project");
    fs::create_dir_all(&project).unwrap();

    let results = sandbox.json(&[
        "sync",
        "rules-all",
        "--json",
        "--project",
        project.to_str().unwrap(),
    ]);
    let results = results.as_array().unwrap();
    assert!(results.iter().all(|r| r["status"] == "success"));
    assert!(results.iter().all(|r| r["toolId"] != "claude-desktop"));

    for file in ["CLAUDE.md", "AGENTS.md", "GEMINI.md", ".cursorrules"] {
        assert!(read(&project.join(file)).contains("Shared guidance."), "{file}");
    }

    let history = sandbox.json(&["history", "--json"]);
    assert_eq!(history.as_array().unwrap().len(), results.len());
}

#[test]
fn test_sync_rules_without_source_or_active_rule() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["sync", "rules", "--tool", "codex", "--global"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rule is active"));
}

#[test]
fn test_mcp_definitions_and_batch_sync() {
    let sandbox = Sandbox::new();
    let claude_config = sandbox.home().join(".claude.json");
    fs::write(&claude_config, r#"{"numStartups": 4, "mcpServers": {"mine": {"command": "keep"}}}"#).unwrap();

    sandbox
        .cmd()
        .args(["mcp", "def-add", "fs", "--command", "npx", "--arg", "-y", "--arg", "fs", "--env", "ROOT=/srv"])
        .assert()
        .success();
    sandbox
        .cmd()
        .args(["mcp", "def-add", "docs", "--url", "https://example.com/mcp"])
        .assert()
        .success();

    let defs = sandbox.json(&["mcp", "def-list", "--json"]);
    assert_eq!(defs.as_array().unwrap().len(), 2);

    let results = sandbox.json(&["sync", "mcp-all", "--json"]);
    let claude = results
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["toolId"] == "claude-code")
        .unwrap();
    assert_eq!(claude["status"], "success");

    let written: Value = serde_json::from_str(&read(&claude_config)).unwrap();
    assert_eq!(written["numStartups"], 4);
    assert_eq!(written["mcpServers"]["mine"]["command"], "keep");
    assert_eq!(written["mcpServers"]["fs"]["env"]["ROOT"], "/srv");
    assert_eq!(written["mcpServers"]["docs"]["url"], "https://example.com/mcp");

    let cursor = results
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["toolId"] == "cursor")
        .unwrap();
    assert_eq!(cursor["status"], "skipped");

    sandbox
        .cmd()
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-code"));
}

#[test]
fn test_sync_mcp_with_set() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["mcp", "def-add", "fs", "--command", "npx"])
        .assert()
        .success();
    sandbox
        .cmd()
        .args(["mcp", "def-add", "web", "--url", "https://example.com/sse", "--sse"])
        .assert()
        .success();

    let defs = sandbox.json(&["mcp", "def-list", "--json"]);
    let id_of = |name: &str| {
        defs.as_array()
            .unwrap()
            .iter()
            .find(|d| d["name"] == name)
            .map(|d| d["id"].as_str().unwrap().to_string())
            .unwrap()
    };
    let (fs_id, web_id) = (id_of("fs"), id_of("web"));

    sandbox
        .cmd()
        .args(["mcp", "set-create", "work", "--server", &web_id, "--disabled", &fs_id])
        .assert()
        .success();
    let sets = sandbox.json(&["mcp", "set-list", "--json"]);
    let set_id = sets[0]["id"].as_str().unwrap().to_string();

    let config = sandbox.dir.path().join("codex.toml");
    sandbox
        .cmd()
        .args(["sync", "mcp", "--tool", "codex", "--source", &set_id, "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("web"));

    let written: toml::Table = toml::from_str(&read(&config)).unwrap();
    let servers = written["mcp_servers"].as_table().unwrap();
    assert!(servers.contains_key("web"));
    assert!(!servers.contains_key("fs"));
    assert_eq!(servers["web"]["type"].as_str(), Some("sse"));
}

#[test]
fn test_set_create_rejects_unknown_definition() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["mcp", "set-create", "work", "--server", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_backup_restore_without_backups_fails() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();

    sandbox
        .cmd()
        .args(["backup", "restore"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no backup found"));
}

#[test]
fn test_sync_config_disables_tool_for_mcp_all() {
    let sandbox = Sandbox::new();
    let claude_config = sandbox.home().join(".claude.json");
    fs::write(&claude_config, "{}").unwrap();
    sandbox
        .cmd()
        .args(["mcp", "def-add", "fs", "--command", "npx"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["sync-config", "mcp", "--tool", "claude-code", "--disable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));

    let results = sandbox.json(&["sync", "mcp-all", "--json"]);
    let claude = results
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["toolId"] == "claude-code")
        .unwrap();
    assert_eq!(claude["status"], "skipped");
    assert_eq!(claude["message"], "동기화 비활성화");
    assert_eq!(read(&claude_config), "{}");

    let settings = sandbox.json(&["sync-config", "show", "--json"]);
    assert_eq!(settings["mcp"]["claude-code"]["enabled"], false);

    sandbox
        .cmd()
        .args(["sync-config", "mcp", "--tool", "claude-code", "--enable"])
        .assert()
        .success();
    let results = sandbox.json(&["sync", "mcp-all", "--json"]);
    let claude = results
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["toolId"] == "claude-code")
        .unwrap();
    assert_eq!(claude["status"], "success");
}

#[test]
fn test_sync_config_rejects_unknown_tool_and_definition() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["sync-config", "mcp", "--tool", "nope", "--disable"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool 'nope'"));
    sandbox
        .cmd()
        .args(["sync-config", "mcp", "--tool", "codex", "--server", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_sync_config_rules_target_path_under_home() {
    let sandbox = Sandbox::new();
    sandbox.add_rule("base", "Routed by settings.");
    sandbox
        .cmd()
        .args(["sync-config", "rules", "--tool", "codex", "--target-path", "~/work/app"])
        .assert()
        .success();

    let project = sandbox.dir.path().join("project");
    fs::create_dir_all(&project).unwrap();
    sandbox
        .cmd()
        .args(["sync", "rules-all", "--project"])
        .arg(&project)
        .assert()
        .success();

    assert!(read(&sandbox.home().join("work/app/AGENTS.md")).contains("Routed by settings."));
    assert!(!project.join("AGENTS.md").exists());
    assert!(project.join("CLAUDE.md").exists());
}

#[test]
fn test_deleting_active_rule_needs_force() {
    let sandbox = Sandbox::new();
    let id = sandbox.add_rule("base", "x");

    sandbox
        .cmd()
        .args(["rules", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(sandbox.json(&["rules", "list", "--json"]).as_array().unwrap().len(), 1);

    sandbox
        .cmd()
        .args(["rules", "delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no rule is active"));
    assert!(sandbox.json(&["rules", "list", "--json"]).as_array().unwrap().is_empty());
}

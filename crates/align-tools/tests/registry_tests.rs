use align_meta::ToolFormat;
use align_tools::{BUILTIN_COUNT, ToolRegistry, load_user_tools};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_tools(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("tools.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn missing_user_file_yields_builtins() {
    let dir = TempDir::new().unwrap();
    let registry = ToolRegistry::load(Some(&dir.path().join("tools.json")), dir.path()).unwrap();
    assert_eq!(registry.len(), BUILTIN_COUNT);
}

#[test]
fn user_entry_overrides_builtin_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_tools(
        &dir,
        r#"[{"id": "cursor", "name": "Cursor Nightly", "configPaths": ["~/.cursor-nightly/mcp.json"], "supportsMcp": true}]"#,
    );

    let registry = ToolRegistry::load(Some(&path), dir.path()).unwrap();
    assert_eq!(registry.len(), BUILTIN_COUNT);

    let cursor = registry.get("cursor").unwrap();
    assert_eq!(cursor.name, "Cursor Nightly");
    assert_eq!(
        PathBuf::from(&cursor.config_paths[0]),
        dir.path().join(".cursor-nightly/mcp.json")
    );
    // Whole entry replaced: built-in rules filename is gone
    assert!(cursor.rules_filename.is_none());
    assert_eq!(registry.ids()[4], "cursor");
}

#[test]
fn new_user_entry_appended() {
    let dir = TempDir::new().unwrap();
    let path = write_tools(
        &dir,
        r#"{"tools": [{"id": "my-agent", "name": "My Agent", "format": "toml", "configPaths": ["{home}/.my-agent.toml"], "supportsMcp": true, "rulesFilename": "AGENT.md", "globalRulesDir": "$HOME/.my-agent"}]}"#,
    );

    let registry = ToolRegistry::load(Some(&path), dir.path()).unwrap();
    assert_eq!(registry.len(), BUILTIN_COUNT + 1);
    assert_eq!(registry.ids().last(), Some(&"my-agent"));

    let tool = registry.get("my-agent").unwrap();
    assert_eq!(tool.format, ToolFormat::Toml);
    assert_eq!(tool.servers_key(), "mcp_servers");
    assert_eq!(
        PathBuf::from(tool.global_rules_dir.as_deref().unwrap()),
        dir.path().join(".my-agent")
    );
}

#[test]
fn malformed_user_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_tools(&dir, r#"{"id": "broken"}"#);
    let err = load_user_tools(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid tool definitions"));
}

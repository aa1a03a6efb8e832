use align_blocks::SyncStrategy;
use align_core::{AppConfig, AppContext, AppPaths, McpSyncStatus, NullSink};
use align_meta::McpDefinition;
use std::sync::Arc;
use tempfile::TempDir;

struct Env {
    _root: TempDir,
    home: TempDir,
    paths: AppPaths,
}

fn env() -> Env {
    let root = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let paths = AppPaths::at(root.path());
    Env {
        _root: root,
        home,
        paths,
    }
}

#[test]
fn context_syncs_rules_into_expanded_global_dir() {
    let env = env();
    let ctx = AppContext::init_with_home(env.paths.clone(), env.home.path(), Arc::new(NullSink)).unwrap();

    let rule = ctx.store.create_rule("base", "Always run the tests.").unwrap();
    let written = ctx
        .rule_syncer()
        .sync_tool_rules("codex", None, true, SyncStrategy::SmartUpdate, None, &rule.id)
        .unwrap();

    assert_eq!(written, env.home.path().join(".codex/AGENTS.md"));
    let content = std::fs::read_to_string(&written).unwrap();
    assert!(content.contains("Always run the tests."));
    assert!(ctx.state.get(&written).unwrap().is_some());
}

#[test]
fn context_detects_tools_under_home() {
    let env = env();
    std::fs::write(env.home.path().join(".claude.json"), r#"{"numStartups": 3}"#).unwrap();
    let ctx = AppContext::init_with_home(env.paths.clone(), env.home.path(), Arc::new(NullSink)).unwrap();
    ctx.store
        .create_definition(McpDefinition::stdio("", "fs", "npx", vec![]))
        .unwrap();

    let results = ctx.mcp_syncer().sync_all_tools(None, None);

    let claude = results.iter().find(|r| r.tool_id == "claude-code").unwrap();
    assert_eq!(claude.status, McpSyncStatus::Success);
    assert_eq!(claude.servers, vec!["fs"]);
    assert!(
        results
            .iter()
            .filter(|r| r.tool_id != "claude-code")
            .all(|r| r.status != McpSyncStatus::Success)
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(env.home.path().join(".claude.json")).unwrap()).unwrap();
    assert_eq!(written["numStartups"], 3);
    assert_eq!(written["mcpServers"]["fs"]["command"], "npx");
}

#[test]
fn config_and_user_tools_are_loaded() {
    let env = env();
    let mut config = AppConfig::default();
    config.sync.max_backups = 2;
    config.save(&env.paths).unwrap();
    std::fs::write(
        env.paths.tools_file(),
        r#"[{"id": "my-agent", "name": "My Agent", "configPaths": ["~/.my-agent.json"], "supportsMcp": true}]"#,
    )
    .unwrap();

    let ctx = AppContext::init_with_home(env.paths.clone(), env.home.path(), Arc::new(NullSink)).unwrap();

    assert_eq!(ctx.config.sync.max_backups, 2);
    let tool = ctx.registry.get("my-agent").unwrap();
    assert_eq!(
        tool.config_paths,
        vec![env.home.path().join(".my-agent.json").to_string_lossy().into_owned()]
    );
    assert!(env.paths.database().exists());
}

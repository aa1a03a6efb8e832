//! Integration tests for MCP server map merging.

use align_blocks::{SyncStrategy, deep_merge_mcp_servers, merge_mcp_servers};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_deep_merge_preserves_extra_fields() {
    let target = obj(json!({"serverA": {"command": "x", "timeout": 30}}));
    let source = obj(json!({"serverA": {"command": "y"}}));

    let merged = deep_merge_mcp_servers(&target, &source);
    assert_eq!(Value::Object(merged), json!({"serverA": {"command": "y", "timeout": 30}}));
}

#[test]
fn test_deep_merge_replaces_source_fields() {
    let target = obj(json!({
        "fs": {"command": "npx", "args": ["old"], "env": {"A": "1"}, "trust": true}
    }));
    let source = obj(json!({
        "fs": {"command": "uvx", "args": ["new"], "env": {"B": "2"}}
    }));

    let merged = deep_merge_mcp_servers(&target, &source);
    assert_eq!(
        merged["fs"],
        json!({"command": "uvx", "args": ["new"], "env": {"B": "2"}, "trust": true})
    );
}

#[test]
fn test_deep_merge_inserts_new_servers() {
    let target = obj(json!({"a": {"command": "a"}}));
    let source = obj(json!({"b": {"type": "http", "url": "https://example.com/mcp"}}));

    let merged = deep_merge_mcp_servers(&target, &source);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged["a"], json!({"command": "a"}));
    assert_eq!(merged["b"], json!({"type": "http", "url": "https://example.com/mcp"}));
}

#[test]
fn test_deep_merge_replaces_non_object_entry() {
    let target = obj(json!({"a": "broken"}));
    let source = obj(json!({"a": {"command": "fixed"}}));

    let merged = deep_merge_mcp_servers(&target, &source);
    assert_eq!(merged["a"], json!({"command": "fixed"}));
}

#[test]
fn test_deep_merge_empty_source_is_identity() {
    let target = obj(json!({"a": {"command": "a"}}));
    let merged = deep_merge_mcp_servers(&target, &Map::new());
    assert_eq!(merged, target);
}

#[test]
fn test_merge_by_strategy() {
    let target = obj(json!({"keep": {"command": "k"}, "shared": {"command": "old", "timeout": 5}}));
    let source = obj(json!({"shared": {"command": "new"}}));

    let smart = merge_mcp_servers(SyncStrategy::SmartUpdate, &target, &source);
    assert_eq!(
        Value::Object(smart),
        json!({"keep": {"command": "k"}, "shared": {"command": "new", "timeout": 5}})
    );

    let overwrite = merge_mcp_servers(SyncStrategy::Overwrite, &target, &source);
    assert_eq!(Value::Object(overwrite), json!({"shared": {"command": "new"}}));
}

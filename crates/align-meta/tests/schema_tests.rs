use align_meta::{McpDefinition, McpSet, McpSetItem, McpTransport, ToolMetadata};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(json!({"id": "1", "name": "a", "type": "stdio", "command": "node"}), "stdio")]
#[case(json!({"id": "1", "name": "a", "command": "node", "args": []}), "stdio")]
#[case(json!({"id": "1", "name": "a", "type": "http", "url": "https://x/mcp"}), "http")]
#[case(json!({"id": "1", "name": "a", "type": "sse", "url": "https://x/sse"}), "sse")]
fn definition_shapes_parse(#[case] raw: serde_json::Value, #[case] tag: &str) {
    let def: McpDefinition = serde_json::from_value(raw).unwrap();
    assert_eq!(def.transport.type_tag(), tag);
}

#[rstest]
#[case(json!({"id": "1", "name": "a"}))]
#[case(json!({"id": "1", "name": "a", "command": "  "}))]
#[case(json!({"id": "1", "name": "a", "command": "node", "url": "https://x"}))]
#[case(json!({"id": "1", "name": "a", "type": "websocket", "url": "wss://x"}))]
fn invalid_definitions_rejected(#[case] raw: serde_json::Value) {
    assert!(serde_json::from_value::<McpDefinition>(raw).is_err());
}

#[test]
fn definition_survives_store_serialization() {
    let mut def = McpDefinition::stdio("d1", "fs", "npx", vec!["-y".into(), "fs".into()]);
    def.description = Some("filesystem".into());
    if let McpTransport::Stdio { cwd, .. } = &mut def.transport {
        *cwd = Some("/srv".into());
    }

    let text = serde_json::to_string(&def).unwrap();
    let back: McpDefinition = serde_json::from_str(&text).unwrap();
    assert_eq!(back, def);
}

#[test]
fn set_items_keep_order_and_disabled_flag() {
    let set: McpSet = serde_json::from_value(json!({
        "id": "s1",
        "name": "work",
        "items": [
            {"serverId": "b"},
            {"serverId": "a", "disabled": true},
            {"serverId": "c", "disabled": false}
        ],
        "isActive": true,
        "createdAt": "2026-01-02T03:04:05Z",
        "updatedAt": "2026-01-02T03:04:05Z"
    }))
    .unwrap();

    assert_eq!(set.items[1], McpSetItem::disabled("a"));
    assert_eq!(set.enabled_server_ids().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn tool_metadata_skips_absent_options() {
    let tool = ToolMetadata::new("x", "X");
    let json = serde_json::to_value(&tool).unwrap();
    assert!(json.get("rulesFilename").is_none());
    assert_eq!(json["format"], "json");
    assert_eq!(json["category"], "cli-agent");
}

//! Translation from MCP definitions to tool-native server objects.
//!
//! The server object shape is the common denominator the supported tools
//! accept: stdio servers carry `command`/`args`/`cwd`, remote servers carry
//! `type`/`url`/`headers`, and both may carry `env`. TOML tools receive the
//! same object through the codec.

use align_meta::{McpDefinition, McpTransport};
use serde_json::{Map, Value, json};

/// Convert a definition into the server object written under its name.
pub fn to_tool_json(def: &McpDefinition) -> Value {
    let mut obj = Map::new();

    match &def.transport {
        McpTransport::Stdio { command, args, cwd } => {
            obj.insert("command".into(), json!(command));
            if !args.is_empty() {
                obj.insert("args".into(), json!(args));
            }
            if let Some(cwd) = cwd {
                obj.insert("cwd".into(), json!(cwd));
            }
        }
        McpTransport::Http { url, headers } | McpTransport::Sse { url, headers } => {
            obj.insert("type".into(), json!(def.transport.type_tag()));
            obj.insert("url".into(), json!(url));
            if let Some(headers) = headers
                && !headers.is_empty()
            {
                obj.insert("headers".into(), json!(headers));
            }
        }
    }

    if let Some(env) = &def.env
        && !env.is_empty()
    {
        obj.insert("env".into(), json!(env));
    }

    Value::Object(obj)
}

/// Build a server map keyed by definition name, in the given order.
///
/// A later definition with a duplicate name replaces the earlier one.
pub fn servers_map<'a>(defs: impl IntoIterator<Item = &'a McpDefinition>) -> Map<String, Value> {
    defs.into_iter()
        .map(|def| (def.name.clone(), to_tool_json(def)))
        .collect()
}

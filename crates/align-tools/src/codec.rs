//! Format-aware reading and writing of tool config files.
//!
//! Both formats are read as a JSON object in memory. Writing MCP servers
//! goes through [`update_servers`], which for TOML edits the servers table
//! of the parsed document in place so the rest of the file keeps its text.

use crate::{Error, Result};
use align_fs::{NormalizedPath, io};
use align_meta::ToolFormat;
use serde_json::{Map, Value};
use std::path::Path;
use toml_edit::{DocumentMut, Item};

/// Parse config text. Blank text is an empty object.
pub fn parse_tool_config(text: &str, format: ToolFormat, path: &Path) -> Result<Map<String, Value>> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    let value = match format {
        ToolFormat::Json => serde_json::from_str::<Value>(text).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: "JSON",
            message: e.to_string(),
        })?,
        ToolFormat::Toml => Value::Object(table_to_json(parse_document(text, path)?.as_table())),
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject {
            path: path.to_path_buf(),
            format: format.as_str(),
        }),
    }
}

/// Load a tool config from disk. A missing file is an empty object.
pub fn load_tool_config(path: &Path, format: ToolFormat) -> Result<Map<String, Value>> {
    let text = io::read_text_or_empty(&NormalizedPath::new(path))?;
    parse_tool_config(&text, format, path)
}

/// Render a config object in the tool's native format.
pub fn render_tool_config(config: &Map<String, Value>, format: ToolFormat) -> Result<String> {
    match format {
        ToolFormat::Json => {
            let mut text = serde_json::to_string_pretty(config).map_err(|e| Error::ConfigRender {
                format: "JSON",
                message: e.to_string(),
            })?;
            text.push('\n');
            Ok(text)
        }
        ToolFormat::Toml => {
            let stripped = strip_nulls(Value::Object(config.clone()));
            let value = toml::Value::try_from(stripped).map_err(|e| Error::ConfigRender {
                format: "TOML",
                message: e.to_string(),
            })?;
            toml::to_string_pretty(&value).map_err(|e| Error::ConfigRender {
                format: "TOML",
                message: e.to_string(),
            })
        }
    }
}

/// Replace the servers object stored under `key` and render the result.
///
/// `update` receives the current servers (empty when the key is missing or
/// holds something other than an object) and returns the new ones. Nothing
/// outside `key` changes. In TOML, servers whose value is unchanged keep
/// their original text.
pub fn update_servers(
    text: &str,
    format: ToolFormat,
    key: &str,
    path: &Path,
    update: impl FnOnce(&Map<String, Value>) -> Map<String, Value>,
) -> Result<String> {
    match format {
        ToolFormat::Json => {
            let mut config = parse_tool_config(text, format, path)?;
            let existing = servers_object(config.get(key), key, path);
            let merged = update(&existing);
            config.insert(key.to_string(), Value::Object(merged));
            render_tool_config(&config, format)
        }
        ToolFormat::Toml => {
            let mut doc = parse_document(text, path)?;
            let existing = servers_object(doc.get(key).map(item_to_json).as_ref(), key, path);
            let merged = update(&existing);

            let root = doc.as_table_mut();
            let mut servers = match root.remove(key) {
                Some(Item::Table(table)) => table,
                _ => {
                    let mut table = toml_edit::Table::new();
                    table.set_implicit(true);
                    table
                }
            };

            let stale: Vec<String> = servers
                .iter()
                .map(|(name, _)| name.to_string())
                .filter(|name| !merged.contains_key(name))
                .collect();
            for name in stale {
                servers.remove(&name);
            }

            for (name, server) in &merged {
                if existing.get(name) == Some(server) && servers.contains_key(name) {
                    continue;
                }
                match json_to_item(server) {
                    Some(item) => {
                        servers.insert(name, item);
                    }
                    None => {
                        servers.remove(name);
                    }
                }
            }

            root.insert(key, Item::Table(servers));
            Ok(doc.to_string())
        }
    }
}

fn servers_object(value: Option<&Value>, key: &str, path: &Path) -> Map<String, Value> {
    match value {
        Some(Value::Object(servers)) => servers.clone(),
        Some(other) => {
            tracing::warn!(path = %path.display(), key, found = %other, "Servers key is not an object; replacing it");
            Map::new()
        }
        None => Map::new(),
    }
}

fn parse_document(text: &str, path: &Path) -> Result<DocumentMut> {
    text.parse().map_err(|e: toml_edit::TomlError| Error::ConfigParse {
        path: path.to_path_buf(),
        format: "TOML",
        message: e.to_string(),
    })
}

fn table_to_json(table: &toml_edit::Table) -> Map<String, Value> {
    table
        .iter()
        .map(|(key, item)| (key.to_string(), item_to_json(item)))
        .collect()
}

fn item_to_json(item: &Item) -> Value {
    match item {
        Item::Value(value) => value_to_json(value),
        Item::Table(table) => Value::Object(table_to_json(table)),
        Item::ArrayOfTables(tables) => {
            Value::Array(tables.iter().map(|t| Value::Object(table_to_json(t))).collect())
        }
        Item::None => Value::Null,
    }
}

// Datetimes have no JSON counterpart and come through as their TOML text.
fn value_to_json(value: &toml_edit::Value) -> Value {
    match value {
        toml_edit::Value::String(s) => Value::String(s.value().clone()),
        toml_edit::Value::Integer(i) => Value::from(*i.value()),
        toml_edit::Value::Float(f) => serde_json::Number::from_f64(*f.value())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml_edit::Value::Boolean(b) => Value::Bool(*b.value()),
        toml_edit::Value::Datetime(d) => Value::String(d.value().to_string()),
        toml_edit::Value::Array(items) => Value::Array(items.iter().map(value_to_json).collect()),
        toml_edit::Value::InlineTable(table) => Value::Object(
            table
                .iter()
                .map(|(key, v)| (key.to_string(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Objects become tables, everything else a plain value. Nulls have no TOML
/// form and yield `None`.
fn json_to_item(value: &Value) -> Option<Item> {
    match value {
        Value::Object(map) => {
            let mut table = toml_edit::Table::new();
            for (key, v) in map {
                if let Some(item) = json_to_item(v) {
                    table.insert(key.as_str(), item);
                }
            }
            Some(Item::Table(table))
        }
        other => json_to_value(other).map(Item::Value),
    }
}

fn json_to_value(value: &Value) -> Option<toml_edit::Value> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some((*b).into()),
        Value::Number(n) => n
            .as_i64()
            .map(toml_edit::Value::from)
            .or_else(|| n.as_f64().map(toml_edit::Value::from)),
        Value::String(s) => Some(s.as_str().into()),
        Value::Array(items) => {
            let mut array = toml_edit::Array::new();
            for item in items.iter().filter_map(json_to_value) {
                array.push(item);
            }
            Some(toml_edit::Value::Array(array))
        }
        Value::Object(map) => {
            let mut table = toml_edit::InlineTable::new();
            for (key, v) in map {
                if let Some(v) = json_to_value(v) {
                    table.insert(key.as_str(), v);
                }
            }
            Some(toml_edit::Value::InlineTable(table))
        }
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn replace_with(incoming: Value) -> impl FnOnce(&Map<String, Value>) -> Map<String, Value> {
        move |_: &Map<String, Value>| incoming.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn blank_is_empty_object() {
        let map = parse_tool_config("  \n", ToolFormat::Json, Path::new("x.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn json_array_rejected() {
        let err = parse_tool_config("[1, 2]", ToolFormat::Json, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { .. }));
    }

    #[test]
    fn toml_nulls_dropped() {
        let config = json!({"model": "o3", "mcp_servers": {"fs": {"command": "npx", "cwd": null}}});
        let text = render_tool_config(config.as_object().unwrap(), ToolFormat::Toml).unwrap();
        assert!(text.contains("model = \"o3\""));
        assert!(text.contains("[mcp_servers.fs]"));
        assert!(!text.contains("cwd"));
    }

    #[test]
    fn toml_parses_nested_tables() {
        let text = "model = \"o3\"\n\n[mcp_servers.fs]\ncommand = \"npx\"\nargs = [\"-y\"]\n";
        let map = parse_tool_config(text, ToolFormat::Toml, Path::new("config.toml")).unwrap();
        assert_eq!(map["mcp_servers"]["fs"]["args"], json!(["-y"]));
    }

    #[test]
    fn toml_datetime_reads_as_text() {
        let text = "updated = 1979-05-27T07:32:00Z\n";
        let map = parse_tool_config(text, ToolFormat::Toml, Path::new("config.toml")).unwrap();
        assert_eq!(map["updated"], json!("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn update_servers_into_empty_toml() {
        let text = update_servers(
            "",
            ToolFormat::Toml,
            "mcp_servers",
            Path::new("config.toml"),
            replace_with(json!({"fs": {"command": "npx", "args": ["-y"], "cwd": null}})),
        )
        .unwrap();

        assert!(text.contains("[mcp_servers.fs]"));
        assert!(!text.contains("cwd"));
        let map = parse_tool_config(&text, ToolFormat::Toml, Path::new("config.toml")).unwrap();
        assert_eq!(map["mcp_servers"]["fs"], json!({"command": "npx", "args": ["-y"]}));
    }

    #[test]
    fn update_servers_replaces_non_object_key() {
        let text = update_servers(
            r#"{"mcpServers": [1]}"#,
            ToolFormat::Json,
            "mcpServers",
            Path::new("x.json"),
            |existing| {
                assert!(existing.is_empty());
                json!({"a": {"command": "x"}}).as_object().cloned().unwrap()
            },
        )
        .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"mcpServers": {"a": {"command": "x"}}}));
    }
}

//! MCP server map merging.
//!
//! Server maps are JSON objects keyed by server name. Merging is shallow per
//! entry: an existing server keeps its keys, and only keys present in the
//! incoming entry are overwritten.

use crate::strategy::SyncStrategy;
use serde_json::{Map, Value};

/// Merge `source` server entries into `target`.
///
/// For each server in `source`:
/// - if `target` has an object under that name, the result keeps all of the
///   target's keys and overwrites only the keys present in the source entry;
/// - otherwise the source entry is inserted verbatim.
///
/// Servers only present in `target` are kept untouched.
pub fn deep_merge_mcp_servers(target: &Map<String, Value>, source: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = target.clone();

    for (name, incoming) in source {
        match (merged.get_mut(name), incoming) {
            (Some(Value::Object(existing)), Value::Object(fields)) => {
                for (key, value) in fields {
                    existing.insert(key.clone(), value.clone());
                }
            }
            _ => {
                merged.insert(name.clone(), incoming.clone());
            }
        }
    }

    merged
}

/// Replace the managed server map wholesale with `source`.
pub fn replace_mcp_servers(source: &Map<String, Value>) -> Map<String, Value> {
    source.clone()
}

/// Produce the managed server map for `strategy`.
///
/// `Overwrite` replaces the map with `source`; `SmartUpdate` deep-merges.
pub fn merge_mcp_servers(
    strategy: SyncStrategy,
    target: &Map<String, Value>,
    source: &Map<String, Value>,
) -> Map<String, Value> {
    match strategy {
        SyncStrategy::Overwrite => replace_mcp_servers(source),
        SyncStrategy::SmartUpdate => deep_merge_mcp_servers(target, source),
    }
}

//! MCP server definitions and sets.
//!
//! A definition is a reusable server launch specification. Its transport is
//! an explicit sum type: a stdio server carries `command`/`args`, an HTTP or
//! SSE server carries a `url`. The flat JSON shape (`type` plus optional
//! fields) only exists at the serialization boundary, where it is validated
//! into exactly one variant.

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transport-specific launch configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpTransport {
    /// Local process communicating over stdin/stdout.
    Stdio {
        command: String,
        args: Vec<String>,
        cwd: Option<String>,
    },
    /// Streamable HTTP remote server.
    Http {
        url: String,
        headers: Option<BTreeMap<String, String>>,
    },
    /// Server-Sent Events remote server.
    Sse {
        url: String,
        headers: Option<BTreeMap<String, String>>,
    },
}

impl McpTransport {
    /// The `type` tag used in flat JSON.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Stdio { .. } => "stdio",
            Self::Http { .. } => "http",
            Self::Sse { .. } => "sse",
        }
    }
}

/// A reusable MCP server definition from the definitions pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMcpDefinition", into = "RawMcpDefinition")]
pub struct McpDefinition {
    pub id: String,
    /// Server name; becomes the key in a tool's server map.
    pub name: String,
    pub transport: McpTransport,
    pub description: Option<String>,
    pub env: Option<BTreeMap<String, String>>,
}

impl McpDefinition {
    /// Create a stdio definition.
    pub fn stdio(
        id: impl Into<String>,
        name: impl Into<String>,
        command: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            transport: McpTransport::Stdio {
                command: command.into(),
                args,
                cwd: None,
            },
            description: None,
            env: None,
        }
    }

    /// Create an HTTP definition.
    pub fn http(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            transport: McpTransport::Http {
                url: url.into(),
                headers: None,
            },
            description: None,
            env: None,
        }
    }

    /// Attach environment variables (builder pattern).
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }
}

/// Flat wire shape of a definition, used only for (de)serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMcpDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

impl TryFrom<RawMcpDefinition> for McpDefinition {
    type Error = Error;

    fn try_from(raw: RawMcpDefinition) -> Result<Self, Self::Error> {
        let invalid = |message: &str| Error::InvalidDefinition {
            name: raw.name.clone(),
            message: message.to_string(),
        };

        let transport = match raw.transport_type.as_deref() {
            None | Some("stdio") => {
                if raw.url.is_some() {
                    return Err(invalid("stdio server must not declare a url"));
                }
                let command = raw
                    .command
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .ok_or_else(|| invalid("stdio server requires a command"))?;
                McpTransport::Stdio {
                    command,
                    args: raw.args.clone().unwrap_or_default(),
                    cwd: raw.cwd.clone(),
                }
            }
            Some(kind @ ("http" | "sse")) => {
                if raw.command.is_some() {
                    return Err(invalid("remote server must not declare a command"));
                }
                let url = raw
                    .url
                    .clone()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| invalid("remote server requires a url"))?;
                let headers = raw.headers.clone();
                if kind == "http" {
                    McpTransport::Http { url, headers }
                } else {
                    McpTransport::Sse { url, headers }
                }
            }
            Some(other) => return Err(invalid(&format!("unknown transport type '{other}'"))),
        };

        Ok(Self {
            id: raw.id,
            name: raw.name,
            transport,
            description: raw.description,
            env: raw.env,
        })
    }
}

impl From<McpDefinition> for RawMcpDefinition {
    fn from(def: McpDefinition) -> Self {
        let mut raw = RawMcpDefinition {
            id: def.id,
            name: def.name,
            description: def.description,
            env: def.env,
            ..Default::default()
        };
        match def.transport {
            McpTransport::Stdio { command, args, cwd } => {
                raw.transport_type = Some("stdio".into());
                raw.command = Some(command);
                raw.args = Some(args);
                raw.cwd = cwd;
            }
            McpTransport::Http { url, headers } => {
                raw.transport_type = Some("http".into());
                raw.url = Some(url);
                raw.headers = headers;
            }
            McpTransport::Sse { url, headers } => {
                raw.transport_type = Some("sse".into());
                raw.url = Some(url);
                raw.headers = headers;
            }
        }
        raw
    }
}

/// One entry of a set: a reference into the definitions pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpSetItem {
    pub server_id: String,
    /// Excluded from the effective server list without losing the association.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl McpSetItem {
    pub fn enabled(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            disabled: false,
        }
    }

    pub fn disabled(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            disabled: true,
        }
    }
}

/// A named, ordered collection of definitions synced as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpSet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<McpSetItem>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl McpSet {
    pub fn new(id: impl Into<String>, name: impl Into<String>, items: Vec<McpSetItem>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            items,
            is_active: false,
            is_archived: false,
            order_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Server ids of the items that are not disabled, in set order.
    pub fn enabled_server_ids(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| !item.disabled)
            .map(|item| item.server_id.as_str())
    }
}

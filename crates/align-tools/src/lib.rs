//! Tool integrations for align-agents.
//!
//! This crate knows about the external AI tools that receive synced content:
//!
//! 1. **Registry** - built-in [`ToolMetadata`](align_meta::ToolMetadata)
//!    entries merged with the user's `tools.json` overrides, with home
//!    placeholders expanded at load time.
//!
//! 2. **Detection** - which tools have a config file on this machine.
//!
//! 3. **Codec and translation** - reading and writing tool configs in their
//!    native JSON or TOML format, and turning MCP definitions into the
//!    server objects those configs hold.

pub mod codec;
pub mod detect;
pub mod error;
pub mod logging;
pub mod mcp_translate;
pub mod registry;

pub use codec::{load_tool_config, parse_tool_config, render_tool_config, update_servers};
pub use detect::{DetectedTool, ToolDetector};
pub use error::{Error, Result};
pub use mcp_translate::{servers_map, to_tool_json};
pub use registry::{BUILTIN_COUNT, ToolRegistry, builtin_tools, load_user_tools};

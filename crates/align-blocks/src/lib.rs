//! Sync strategies for align-agents.
//!
//! Pure functions that compute the content a target file should hold, given
//! what is on disk now and what the source wants to write. Nothing in this
//! crate touches the filesystem.
//!
//! # Managed region
//!
//! Text targets (rules files such as `CLAUDE.md` or `AGENTS.md`) carry one
//! managed region delimited by two literal markers, each on its own line:
//!
//! ```text
//! <!-- align-agents-start -->
//! synced content
//! <!-- align-agents-end -->
//! ```
//!
//! `smart-update` only ever rewrites the bytes between the markers. Everything
//! outside belongs to the user.
//!
//! # MCP server maps
//!
//! JSON/TOML tool configs hold a named server map. [`merge::deep_merge_mcp_servers`]
//! merges new server entries into it field by field so user-added keys survive.

pub mod error;
pub mod markers;
pub mod merge;
pub mod strategy;

pub use error::{Error, Result};
pub use markers::{END_MARKER, START_MARKER, ManagedRegion, find_managed_region, wrap_managed};
pub use merge::{deep_merge_mcp_servers, merge_mcp_servers, replace_mcp_servers};
pub use strategy::{SyncStrategy, apply_sync_strategy};

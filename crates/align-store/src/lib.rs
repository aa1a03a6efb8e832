//! SQLite-backed store for align-agents.
//!
//! One database file holds rules, the MCP definitions pool, MCP sets, the
//! per-tool sync settings and the sync history. [`SqliteStore`] implements
//! the read traits from `align_meta::store` so the sync core never sees SQL.

mod db;
pub mod error;
mod history;
mod mcp;
mod rules;
mod settings;

pub use db::SqliteStore;
pub use error::{Error, Result};

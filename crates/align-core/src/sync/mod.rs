//! Sync orchestration
//!
//! Both orchestrators write targets the same way (see [`target`]): read the
//! current content, compare it with the recorded checksum, back it up,
//! compute the new content, write atomically and record the new checksum.
//! Single-tool calls return errors; batch calls turn each tool's outcome
//! into a status entry and never fail as a whole.

mod mcp_syncer;
mod report;
mod rule_syncer;
mod target;

pub use mcp_syncer::McpSyncer;
pub use report::{
    McpSyncResult, McpSyncStatus, RulesSyncResult, RulesSyncStatus, SKIP_DISABLED,
    SKIP_NOT_INSTALLED,
};
pub use rule_syncer::RuleSyncer;

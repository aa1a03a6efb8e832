//! Tool registry
//!
//! Built-in entries are declared once in [`builtins`]; the user's
//! `tools.json` is merged over them by id at load time.

mod builtins;
mod loader;
mod store;

pub use builtins::{BUILTIN_COUNT, builtin_tools};
pub use loader::load_user_tools;
pub use store::ToolRegistry;

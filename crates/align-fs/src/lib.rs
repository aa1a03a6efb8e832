//! Filesystem primitives for align-agents
//!
//! Provides path normalization, home expansion, atomic I/O, content checksums
//! and a format-agnostic config loader.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, expand_home};

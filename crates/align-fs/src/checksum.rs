//! SHA-256 checksum utilities
//!
//! A single canonical checksum format (`sha256:<hex>`) is used for drift
//! detection. These digests are compared, never trusted for security.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of string content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &str) -> String {
    digest(content.as_bytes())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// Returns `None` when the file does not exist or cannot be read. A file
/// holding the same bytes as a string hashes identically to
/// [`compute_content_checksum`].
pub fn compute_file_checksum(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(content) => Some(digest(&content)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Checksum unavailable");
            None
        }
    }
}

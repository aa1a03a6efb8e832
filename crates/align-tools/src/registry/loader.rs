//! User tool definitions file (`tools.json`)

use crate::{Error, Result};
use align_fs::{NormalizedPath, io};
use align_meta::ToolMetadata;
use serde::Deserialize;
use std::path::Path;

/// Accepted layouts: a bare array, or `{ "tools": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ToolsFile {
    List(Vec<ToolMetadata>),
    Wrapped { tools: Vec<ToolMetadata> },
}

/// Read user tool definitions. A missing or blank file yields no tools.
pub fn load_user_tools(path: &Path) -> Result<Vec<ToolMetadata>> {
    let content = io::read_text_or_empty(&NormalizedPath::new(path))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed: ToolsFile =
        serde_json::from_str(&content).map_err(|e| Error::InvalidToolsFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(match parsed {
        ToolsFile::List(tools) | ToolsFile::Wrapped { tools } => tools,
    })
}

//! Error types for align-tools

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] align_fs::Error),

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Failed to render {format} config: {message}")]
    ConfigRender {
        format: &'static str,
        message: String,
    },

    #[error("Config at {path} is not a {format} object")]
    NotAnObject { path: PathBuf, format: &'static str },

    #[error("Invalid tool definitions in {path}: {message}")]
    InvalidToolsFile { path: PathBuf, message: String },
}

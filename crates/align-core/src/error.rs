//! Error types for align-core

/// Result type for align-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in align-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule, set, tool or history entry is missing
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Malformed sync request
    #[error("Invalid request: {message}")]
    Validation { message: String },

    /// The tool cannot receive this kind of content
    #[error("Tool '{tool}' does not support {feature}")]
    NotSupported { tool: String, feature: &'static str },

    /// The servers could not be merged into a tool config
    #[error("Sync error: {message}")]
    Sync { message: String },

    /// Strategy tag that is neither `overwrite` nor `smart-update`
    #[error(transparent)]
    UnknownStrategy(#[from] align_blocks::Error),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from align-fs
    #[error(transparent)]
    Fs(#[from] align_fs::Error),

    /// Metadata error from align-meta
    #[error(transparent)]
    Meta(#[from] align_meta::Error),

    /// Tools error from align-tools
    #[error(transparent)]
    Tools(#[from] align_tools::Error),

    /// Store error from align-store
    #[error(transparent)]
    Store(#[from] align_store::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn sync(message: impl Into<String>) -> Self {
        Self::Sync {
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

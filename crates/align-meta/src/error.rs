//! Error types for align-meta

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid MCP definition '{name}': {message}")]
    InvalidDefinition { name: String, message: String },

    #[error("Tool not found: {id}")]
    ToolNotFound { id: String },

    #[error("Rule not found: {id}")]
    RuleNotFound { id: String },

    #[error("MCP set not found: {id}")]
    SetNotFound { id: String },

    #[error("Store error: {message}")]
    Backend { message: String },
}

impl Error {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

//! Error types for align-store

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} named '{name}' already exists")]
    Conflict { kind: &'static str, name: String },

    #[error("Invalid stored value in {column}: {message}")]
    InvalidData { column: &'static str, message: String },
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<Error> for align_meta::Error {
    fn from(err: Error) -> Self {
        align_meta::Error::backend(err.to_string())
    }
}

//! Error types for align-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown sync strategy: {tag}")]
    UnknownStrategy { tag: String },
}

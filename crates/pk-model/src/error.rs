use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PkError {
    /// The key is not present in the drug store.
    #[error("drug not found: {key}")]
    NotFound { key: String },
}

pub type Result<T> = std::result::Result<T, PkError>;

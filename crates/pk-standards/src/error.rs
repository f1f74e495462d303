#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse drug database {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record {key:?}: {message}")]
    InvalidRecord { key: String, message: String },

    #[error("record {key:?} has an empty name")]
    EmptyName { key: String },

    #[error("keys {first:?} and {second:?} both normalize to {key:?}")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("drug {key:?} already exists")]
    DuplicateRecord { key: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

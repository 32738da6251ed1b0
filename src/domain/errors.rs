use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Cannot add an empty task")]
    EmptyText,
}

/// Why a stored snapshot could not be turned back into a task list.
///
/// Never shown to the user: callers fall back to an empty list.
#[derive(Debug, Error)]
pub enum PersistedDataError {
    #[error("no snapshot stored under key `{0}`")]
    Missing(String),
    #[error("snapshot under key `{key}` is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

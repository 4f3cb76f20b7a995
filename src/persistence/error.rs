use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported version: {found}. Expected: {expected}")]
    UnsupportedVersion { found: String, expected: String },
    #[error("Malformed game data: {0}")]
    MalformedData(String),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        PersistenceError::MalformedData(message.into())
    }
}

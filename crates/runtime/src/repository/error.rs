//! Error types raised by document store implementations.

use thiserror::Error;

/// Errors surfaced by document store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store lock was poisoned")]
    LockPoisoned,

    #[error("document store is unavailable")]
    Unavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document key {0:?}")]
    InvalidKey(String),

    #[error("document {collection}/{key} is not a JSON object")]
    NotAnObject { collection: String, key: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

use mine_core::{ErrorSeverity, GameError, SnapshotError};

use crate::repository::StoreError;

pub type Result<T> = std::result::Result<T, PersistenceError>;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed {collection} document: {reason}")]
    Malformed {
        collection: &'static str,
        #[source]
        reason: MalformedDocument,
    },

    #[error("failed to encode {collection} document")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    pub(crate) fn malformed(collection: &'static str, reason: impl Into<MalformedDocument>) -> Self {
        Self::Malformed {
            collection,
            reason: reason.into(),
        }
    }

    /// True when the backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Store(StoreError::Unavailable))
    }
}

/// Why a stored document was refused.
#[derive(Debug, thiserror::Error)]
pub enum MalformedDocument {
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("unsupported schema version {0}")]
    UnsupportedSchema(u32),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl GameError for PersistenceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Store(_) => ErrorSeverity::Recoverable,
            Self::Malformed { .. } | Self::Encode { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(StoreError::Unavailable) => "PERSIST_UNAVAILABLE",
            Self::Store(_) => "PERSIST_STORE",
            Self::Malformed { .. } => "PERSIST_MALFORMED",
            Self::Encode { .. } => "PERSIST_ENCODE",
        }
    }
}

//! Storage error taxonomy.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Backend operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    /// Single-record lookup.
    Get,
    /// Single-record upsert.
    Put,
    /// Single-record removal.
    Delete,
    /// Full collection scan.
    List,
    /// Filtered collection scan.
    Query,
}

impl StorageOperation {
    /// Returns the canonical operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Errors returned by key/value backends and the stores built on them.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The backend could not be reached.
    #[error("storage backend unavailable during {operation} on '{collection}'")]
    Unavailable {
        /// Collection being accessed.
        collection: String,
        /// Operation being attempted.
        operation: StorageOperation,
    },

    /// The backend did not answer within the configured bound.
    #[error("storage {operation} on '{collection}' timed out after {timeout_ms} ms")]
    Timeout {
        /// Collection being accessed.
        collection: String,
        /// Operation being attempted.
        operation: StorageOperation,
        /// Configured bound in milliseconds.
        timeout_ms: u64,
    },

    /// A stored record could not be encoded or decoded.
    #[error("cannot encode or decode record '{id}' in '{collection}': {reason}")]
    Codec {
        /// Collection holding the record.
        collection: String,
        /// Record identifier.
        id: String,
        /// Underlying serialisation failure.
        reason: Arc<serde_json::Error>,
    },

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps an arbitrary backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Wraps a serialisation failure for one record.
    pub fn codec(collection: &str, id: &str, err: serde_json::Error) -> Self {
        Self::Codec {
            collection: collection.to_owned(),
            id: id.to_owned(),
            reason: Arc::new(err),
        }
    }

    /// Reports a lock that was poisoned by a panicking writer.
    pub(crate) fn poisoned(err: impl fmt::Display) -> Self {
        Self::backend(std::io::Error::other(err.to_string()))
    }

    /// Returns whether the caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}

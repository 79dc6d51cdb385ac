//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its persistent stores.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The persistent store failed to read or write
    #[error("Store error: {0}")]
    Store(String),

    /// Underlying I/O failure in a file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The data stored under the namespace is not an entry mapping
    #[error("Malformed cache snapshot under namespace '{namespace}': {source}")]
    MalformedSnapshot {
        namespace: String,
        #[source]
        source: serde_json::Error,
    },

    /// The stored value does not decode as the requested type
    #[error("Type mismatch for key '{key}': {source}")]
    TypeMismatch {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

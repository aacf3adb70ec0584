//! Error types for the storage layer.

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested document was not found.
    #[error("document not found")]
    NotFound,

    /// The backing database could not be reached or failed the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The collection is not part of the schema.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// A document id or field path is malformed.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    /// Returns true if this error might be resolved by retrying.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

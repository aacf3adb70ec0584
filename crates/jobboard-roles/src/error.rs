//! Error types for role management.
//!
//! This module defines all errors that can occur while resolving login roles,
//! switching roles, and persisting role sessions.

use jobboard_core::{Role, UserId};
use jobboard_store::StoreError;
use thiserror::Error;

/// A result type using `RoleError`.
pub type Result<T> = std::result::Result<T, RoleError>;

/// Errors that can occur in role management operations.
#[derive(Debug, Error)]
pub enum RoleError {
    /// The document store could not be read.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// A write to the document store failed; the change was not committed.
    #[error("persistence failed: {0}")]
    PersistenceError(#[source] StoreError),

    /// The user has no unified account.
    #[error("account not found: {0}")]
    AccountNotFound(UserId),

    /// The user holds no profile for the requested role.
    #[error("user {user_id} has no {role} profile")]
    InvalidRole {
        /// The user requesting the switch.
        user_id: UserId,
        /// The requested role.
        role: Role,
    },

    /// The store refused a read as malformed (unknown collection or bad key).
    #[error("store rejected request: {0}")]
    StoreRejected(#[source] StoreError),

    /// A stored document could not be decoded.
    #[error("corrupt {collection} document for {user_id}: {reason}")]
    Corrupt {
        /// The collection holding the document.
        collection: &'static str,
        /// The document owner.
        user_id: UserId,
        /// The decoding failure.
        reason: String,
    },
}

impl RoleError {
    /// Classify a failed read of `collection/{user_id}`.
    ///
    /// Only an unreachable store is reported as `StoreUnavailable`. A value
    /// that does not decode is `Corrupt`.
    #[must_use]
    pub fn read(collection: &'static str, user_id: &UserId, err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => Self::StoreUnavailable(err),
            StoreError::Serialization(_) => Self::corrupt(collection, user_id, &err),
            StoreError::NotFound
            | StoreError::UnknownCollection(_)
            | StoreError::InvalidKey(_) => Self::StoreRejected(err),
        }
    }

    /// Classify a failed write.
    #[must_use]
    pub fn write(err: StoreError) -> Self {
        Self::PersistenceError(err)
    }

    /// A stored document failed to decode.
    #[must_use]
    pub fn corrupt(collection: &'static str, user_id: &UserId, err: &StoreError) -> Self {
        Self::Corrupt {
            collection,
            user_id: user_id.clone(),
            reason: err.to_string(),
        }
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::AccountNotFound(_) => 404,
            Self::InvalidRole { .. } => 409,
            Self::StoreUnavailable(_) => 503,
            Self::PersistenceError(_) | Self::StoreRejected(_) | Self::Corrupt { .. } => 500,
        }
    }

    /// Returns true if this error might be resolved by retrying.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::StoreUnavailable(err) | Self::PersistenceError(err) => err.is_retriable(),
            _ => false,
        }
    }
}

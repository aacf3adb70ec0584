//! Common error types for jobboard.
//!
//! This module provides shared error types that are used across multiple crates.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur throughout the jobboard system.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An invalid identifier was provided.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] crate::ids::IdError),

    /// A role name that is neither `candidate` nor `company`.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// A role preference that is not `ask`, `candidate` or `company`.
    #[error("invalid role preference: {0}")]
    InvalidPreference(String),
}

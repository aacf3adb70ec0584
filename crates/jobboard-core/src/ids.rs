//! Identifier types for jobboard.
//!
//! User identifiers are issued by the authentication provider and are opaque to
//! this system. They double as document ids in every user-keyed collection, so
//! they are validated once here instead of at each storage call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest identifier accepted, in bytes.
pub const MAX_USER_ID_LEN: usize = 128;

/// An opaque, stable user identifier (the auth provider's `uid`).
///
/// A `UserId` is never empty and never contains `/`, so it is always usable as a
/// single document id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parse a `UserId`, validating it can be used as a document id.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty, too long, or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.len() > MAX_USER_ID_LEN {
            return Err(IdError::TooLong {
                max: MAX_USER_ID_LEN,
                got: value.len(),
            });
        }
        if value.contains('/') {
            return Err(IdError::InvalidCharacter('/'));
        }
        Ok(Self(value))
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier is the empty string.
    #[error("identifier is empty")]
    Empty,

    /// The identifier exceeds the maximum length.
    #[error("identifier too long: max {max} bytes, got {got}")]
    TooLong {
        /// The maximum number of bytes.
        max: usize,
        /// The actual number of bytes.
        got: usize,
    },

    /// The identifier contains a character that cannot appear in a document id.
    #[error("identifier contains invalid character {0:?}")]
    InvalidCharacter(char),
}

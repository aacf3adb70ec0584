//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The ID token has expired.
    #[error("token expired")]
    TokenExpired,

    /// The ID token signature is invalid.
    #[error("invalid signature")]
    InvalidSignature,

    /// The token was not issued for this project.
    #[error("invalid issuer")]
    InvalidIssuer,

    /// The token audience is not this project.
    #[error("invalid audience")]
    InvalidAudience,

    /// The `sub` claim is not a usable user id.
    #[error("invalid user ID: {0}")]
    InvalidUserId(String),

    /// A required claim or header field is missing.
    #[error("missing required claim: {0}")]
    MissingClaim(String),

    /// The token does not carry an authorization header.
    #[error("missing bearer token")]
    MissingToken,

    /// Failed to fetch the signing keys.
    #[error("JWKS fetch failed: {0}")]
    JwksFetchFailed(String),

    /// The key ID specified in the token was not found.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The token format is invalid.
    #[error("invalid token format: {0}")]
    InvalidToken(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns `true` if this error indicates the client should retry with a new token.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::TokenExpired | Self::JwksFetchFailed(_))
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::TokenExpired
            | Self::InvalidSignature
            | Self::InvalidIssuer
            | Self::InvalidAudience
            | Self::InvalidUserId(_)
            | Self::MissingClaim(_)
            | Self::MissingToken
            | Self::InvalidToken(_)
            | Self::KeyNotFound(_) => 401,
            Self::JwksFetchFailed(_) => 503,
            Self::Internal(_) => 500,
        }
    }
}

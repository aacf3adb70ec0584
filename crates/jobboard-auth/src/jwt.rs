//! ID token validation and claims extraction.
//!
//! This module provides the core JWT validation logic, including signature
//! verification and claims validation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;

use jobboard_core::UserId;

use crate::error::{AuthError, Result};
use crate::jwks::JwksProvider;
use crate::AuthConfig;

/// Validated claims extracted from an ID token.
#[derive(Debug, Clone)]
pub struct ValidatedClaims {
    /// The Firebase uid from the `sub` claim.
    pub user_id: UserId,
    /// The email address, if the sign-in method provides one.
    pub email: Option<String>,
    /// Whether the provider verified the email address.
    pub email_verified: bool,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Trait for validating JWTs.
#[async_trait]
pub trait JwtValidator: Send + Sync {
    /// Validate a JWT and extract claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid, expired, or cannot be validated.
    async fn validate(&self, token: &str) -> Result<ValidatedClaims>;
}

/// Raw claims from an ID token. `iss` and `aud` are checked by `jsonwebtoken`.
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    exp: u64,
}

/// JWKS-based ID token validator.
///
/// This validator fetches public keys from a JWKS endpoint and validates
/// signatures using RSA (`RS256`).
pub struct JwksValidator {
    config: AuthConfig,
    jwks: JwksProvider,
}

impl JwksValidator {
    /// Create a new JWKS-based validator.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if the HTTP client cannot be created.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let jwks = JwksProvider::new(config.clone())?;
        Ok(Self { config, jwks })
    }

    /// Get a reference to the JWKS provider for manual operations.
    #[must_use]
    pub const fn jwks(&self) -> &JwksProvider {
        &self.jwks
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer()]);
        validation.set_audience(&[self.config.audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

#[async_trait]
impl JwtValidator for JwksValidator {
    async fn validate(&self, token: &str) -> Result<ValidatedClaims> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| AuthError::MissingClaim("kid".to_string()))?;

        let key = self.jwks.get_key(&kid).await?;

        let token_data =
            decode::<RawClaims>(token, &key, &self.validation()).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                ErrorKind::InvalidAudience => AuthError::InvalidAudience,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.clone()),
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        let claims = token_data.claims;

        let user_id =
            UserId::new(claims.sub).map_err(|e| AuthError::InvalidUserId(e.to_string()))?;

        let exp_secs = i64::try_from(claims.exp).unwrap_or(i64::MAX);
        let expires_at = DateTime::from_timestamp(exp_secs, 0)
            .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".to_string()))?;

        tracing::debug!(user_id = %user_id, "Validated ID token");

        Ok(ValidatedClaims {
            user_id,
            email: claims.email,
            email_verified: claims.email_verified,
            expires_at,
        })
    }
}

/// A mock JWT validator for testing.
///
/// This validator accepts any token in the format `test-token:<uid>` or
/// `test-token:<uid>:<email>` and extracts the claims from it.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockJwtValidator {
    /// Whether the email is reported as verified for all validated tokens.
    pub email_verified: bool,
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl JwtValidator for MockJwtValidator {
    async fn validate(&self, token: &str) -> Result<ValidatedClaims> {
        let rest = token.strip_prefix("test-token:").ok_or_else(|| {
            AuthError::InvalidToken("expected test-token:<uid>[:<email>]".to_string())
        })?;

        let (uid, email) = match rest.split_once(':') {
            Some((uid, email)) => (uid, Some(email.to_string())),
            None => (rest, None),
        };

        let user_id = UserId::new(uid).map_err(|e| AuthError::InvalidUserId(e.to_string()))?;

        Ok(ValidatedClaims {
            user_id,
            email,
            email_verified: self.email_verified,
            expires_at: Utc::now() + chrono::Duration::hours(1),
        })
    }
}

//! Firebase ID token validation for jobboard.
//!
//! Users sign in with Firebase Authentication on the client. Every API call
//! carries the resulting ID token, which this crate verifies:
//!
//! - JWKS (JSON Web Key Set) fetching and caching
//! - RSA (`RS256`) signature validation
//! - Issuer, audience and expiry checks, and extraction of the user id
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   Gateway        │────▶│   JwtValidator   │
//! │   (HTTP)         │     │   (trait)        │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │  JwksValidator   │
//!                          └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │  JwksProvider    │
//!                          │  (key cache)     │
//!                          └────────┬─────────┘
//!                                   │ HTTPS
//!                          ┌────────▼─────────┐
//!                          │  Google secure   │
//!                          │  token JWKS      │
//!                          └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use jobboard_auth::{AuthConfig, JwksValidator, JwtValidator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig {
//!     project_id: "jobboard-prod".to_string(),
//!     ..AuthConfig::default()
//! };
//!
//! let validator = JwksValidator::new(config)?;
//!
//! // In a request handler:
//! let token = "eyJhbGciOiJSUzI1NiIsImtpZCI6Ii...";
//! let claims = validator.validate(token).await?;
//!
//! println!("User ID: {}", claims.user_id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod jwks;
pub mod jwt;

pub use error::{AuthError, Result};
pub use jwt::{JwksValidator, JwtValidator, ValidatedClaims};

#[cfg(any(test, feature = "test-utils"))]
pub use jwt::MockJwtValidator;

/// Google's public keys for Firebase ID tokens.
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Configuration for Firebase ID token validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Firebase project id. Tokens must name it as audience and in the issuer.
    pub project_id: String,
    /// Where to fetch the signing keys from.
    pub jwks_url: String,
    /// How often to refresh the JWKS cache, in seconds.
    pub jwks_refresh_seconds: u64,
}

impl AuthConfig {
    /// Get the expected JWT issuer.
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }

    /// Get the expected JWT audience.
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.project_id
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            project_id: "jobboard-dev".to_string(),
            jwks_url: FIREBASE_JWKS_URL.to_string(),
            jwks_refresh_seconds: 3600,
        }
    }
}

//! Authentication extractor.
//!
//! This module provides the `AuthUser` extractor that validates Firebase ID
//! tokens and extracts the user identity from requests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use jobboard_auth::{AuthError, JwtValidator, ValidatedClaims};
use jobboard_core::UserId;
use jobboard_roles::RoleManager;

use crate::error::ApiError;
use crate::state::GatewayState;

/// An authenticated user extracted from an ID token.
///
/// This extractor validates the `Authorization: Bearer <token>` header
/// and provides access to the user's identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The Firebase uid.
    pub user_id: UserId,
    /// Email address from the token, if any.
    pub email: Option<String>,
}

impl AuthUser {
    /// Create an `AuthUser` from validated claims.
    #[must_use]
    pub fn from_claims(claims: ValidatedClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl<R, V> FromRequestParts<Arc<GatewayState<R, V>>> for AuthUser
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<GatewayState<R, V>>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let claims = state.jwt_validator.validate(token).await?;

        Ok(Self::from_claims(claims))
    }
}

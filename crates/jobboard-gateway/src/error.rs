//! API error types and responses.
//!
//! This module defines the standard error format for all API responses:
//!
//! ```text
//! { "error": { "code": "conflict", "message": "..." } }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use jobboard_auth::AuthError;
use jobboard_core::CoreError;
use jobboard_roles::RoleError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid authentication token.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A backing service is temporarily unreachable.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::BadRequest(_) => "bad_request",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::InvalidIssuer
            | AuthError::InvalidAudience
            | AuthError::InvalidUserId(_)
            | AuthError::MissingClaim(_)
            | AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::KeyNotFound(_) => {
                tracing::debug!(error = %err, "Rejected token");
                Self::Unauthorized
            }
            AuthError::JwksFetchFailed(_) => {
                tracing::warn!(error = %err, "Signing keys unavailable");
                Self::Unavailable("authentication keys".to_string())
            }
            AuthError::Internal(_) => {
                tracing::error!(error = %err, "Auth internal error");
                Self::Internal("authentication service error".to_string())
            }
        }
    }
}

impl From<RoleError> for ApiError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::AccountNotFound(user_id) => Self::NotFound(format!("account {user_id}")),
            RoleError::InvalidRole { role, .. } => {
                Self::Conflict(format!("no {role} profile exists for this user"))
            }
            RoleError::StoreUnavailable(store_err) => {
                tracing::warn!(error = %store_err, "Store unavailable");
                Self::Unavailable("storage".to_string())
            }
            RoleError::PersistenceError(store_err) => {
                tracing::error!(error = %store_err, "Store write failed");
                Self::Internal("storage error".to_string())
            }
            RoleError::StoreRejected(store_err) => {
                tracing::error!(error = %store_err, "Store rejected request");
                Self::Internal("storage error".to_string())
            }
            err @ RoleError::Corrupt { .. } => {
                tracing::error!(error = %err, "Corrupt document");
                Self::Internal("storage error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::{Role, UserId};
    use jobboard_store::StoreError;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("test".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Unavailable("test".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn role_errors_map_to_status() {
        let user_id = UserId::new("u1").unwrap();

        let err = ApiError::from(RoleError::InvalidRole {
            user_id: user_id.clone(),
            role: Role::Company,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ApiError::from(RoleError::AccountNotFound(user_id.clone()));
        assert_eq!(err.code(), "not_found");

        let err = ApiError::from(RoleError::read(
            "candidates",
            &user_id,
            StoreError::Unavailable("down".into()),
        ));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let err = ApiError::from(RoleError::read(
            "userSessions",
            &user_id,
            StoreError::Serialization("bad cbor".into()),
        ));
        assert_eq!(err.code(), "internal_error");

        let err = ApiError::from(RoleError::write(StoreError::Unavailable("down".into())));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_map_to_status() {
        assert_eq!(
            ApiError::from(AuthError::TokenExpired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::JwksFetchFailed("x".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn bad_role_name_is_bad_request() {
        let err = ApiError::from("admin".parse::<Role>().unwrap_err());
        assert_eq!(err.code(), "bad_request");
    }
}

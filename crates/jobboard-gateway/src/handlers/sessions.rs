//! Role session endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use jobboard_auth::JwtValidator;
use jobboard_roles::RoleManager;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::GatewayState;

/// Get the caller's role session.
///
/// # Errors
///
/// Returns 404 if no role was ever activated.
pub async fn current_session<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let session = state
        .roles
        .current_session(&user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("session for {}", user.user_id)))?;

    Ok(Json(session))
}

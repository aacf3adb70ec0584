//! Account registration endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use jobboard_auth::JwtValidator;
use jobboard_roles::RoleManager;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::GatewayState;

/// Register the caller's unified account.
///
/// The email is taken from the ID token. Registering twice returns the
/// existing account unchanged.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub async fn register_account<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let email = user.email.unwrap_or_default();
    let account = state.roles.register_account(&user.user_id, &email).await?;

    Ok((StatusCode::OK, Json(account)))
}

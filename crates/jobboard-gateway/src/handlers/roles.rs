//! Login role resolution and role switching endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use jobboard_auth::JwtValidator;
use jobboard_core::{Role, RolePreference};
use jobboard_roles::RoleManager;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::GatewayState;

// =============================================================================
// Request Types
// =============================================================================

/// Body of a role switch.
#[derive(Debug, Deserialize)]
pub struct SwitchRoleBody {
    /// Target role name.
    pub role: String,
}

/// Body of a preference update.
#[derive(Debug, Deserialize)]
pub struct PreferenceBody {
    /// `ask`, `candidate` or `company`.
    pub preference: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Recommend a login role without changing anything.
///
/// # Errors
///
/// Returns 404 if the caller has no account.
pub async fn determine_login_role<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let decision = state.roles.determine_login_role(&user.user_id).await?;
    Ok(Json(decision))
}

/// Complete a login, activating the recommended role if no choice is needed.
///
/// # Errors
///
/// Returns 404 if the caller has no account.
pub async fn complete_login<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let outcome = state.roles.complete_login(&user.user_id).await?;
    Ok(Json(outcome))
}

/// Switch the caller's active role.
///
/// # Errors
///
/// Returns 400 for an unknown role name and 409 if the caller holds no
/// profile for the role.
pub async fn switch_role<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: AuthUser,
    ApiJson(body): ApiJson<SwitchRoleBody>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let role: Role = body.role.parse()?;
    let session = state.roles.switch_role(&user.user_id, role).await?;
    Ok(Json(session))
}

/// Store the caller's role selection preference.
///
/// # Errors
///
/// Returns 400 for an unknown preference and 404 if the caller has no account.
pub async fn update_role_preference<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: AuthUser,
    ApiJson(body): ApiJson<PreferenceBody>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let preference: RolePreference = body.preference.parse()?;
    state
        .roles
        .update_role_preference(&user.user_id, preference)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

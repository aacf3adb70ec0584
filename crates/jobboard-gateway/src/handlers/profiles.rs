//! Profile creation endpoint.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use jobboard_auth::JwtValidator;
use jobboard_core::Role;
use jobboard_roles::RoleManager;
use jobboard_store::Document;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::GatewayState;

/// Create (or replace) the caller's candidate or company profile.
///
/// The body is stored as the profile document. The response lists which
/// profiles the caller now holds.
///
/// ```text
/// POST /v1/profiles/company
/// { "name": "Acme" }
///
/// Response: 201 Created
/// { "hasCandidate": false, "hasCompany": true, "availableRoles": ["company"] }
/// ```
///
/// # Errors
///
/// Returns 400 for an unknown role and 404 if the caller has no account.
pub async fn create_profile<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: AuthUser,
    Path(role): Path<String>,
    ApiJson(profile): ApiJson<Document>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let role: Role = role.parse()?;
    let profiles = state
        .roles
        .create_profile(&user.user_id, role, profile)
        .await?;

    Ok((StatusCode::CREATED, Json(profiles)))
}

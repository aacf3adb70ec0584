//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use jobboard_auth::JwtValidator;
use jobboard_roles::RoleManager;

use crate::handlers::{accounts, health, profiles, roles, sessions};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Accounts and profiles (authenticated)
/// - `POST /v1/accounts` - Register the caller's account
/// - `POST /v1/profiles/:role` - Create a candidate or company profile
///
/// ## Roles (authenticated)
/// - `GET /v1/roles/login` - Recommend a login role
/// - `POST /v1/roles/login` - Complete login
/// - `POST /v1/roles/switch` - Switch active role
/// - `PUT /v1/roles/preference` - Update role selection preference
///
/// ## Sessions (authenticated)
/// - `GET /v1/sessions/current` - Get the caller's role session
pub fn create_router<R, V>(state: GatewayState<R, V>) -> Router
where
    R: RoleManager + 'static,
    V: JwtValidator + 'static,
{
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Accounts and profiles
        .route("/v1/accounts", post(accounts::register_account::<R, V>))
        .route(
            "/v1/profiles/:role",
            post(profiles::create_profile::<R, V>),
        )
        // Roles
        .route(
            "/v1/roles/login",
            get(roles::determine_login_role::<R, V>).post(roles::complete_login::<R, V>),
        )
        .route("/v1/roles/switch", post(roles::switch_role::<R, V>))
        .route(
            "/v1/roles/preference",
            put(roles::update_role_preference::<R, V>),
        )
        // Sessions
        .route(
            "/v1/sessions/current",
            get(sessions::current_session::<R, V>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use jobboard_auth::MockJwtValidator;
    use jobboard_roles::RoleManagerService;
    use jobboard_store::MemoryStore;
    use tower::ServiceExt;

    use crate::config::GatewayConfig;

    fn router(config: GatewayConfig) -> Router {
        let roles = Arc::new(RoleManagerService::with_defaults(Arc::new(
            MemoryStore::new(),
        )));
        create_router(GatewayState::new(
            roles,
            Arc::new(MockJwtValidator::default()),
            config,
        ))
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = router(GatewayConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let config = GatewayConfig {
            max_body_bytes: 16,
            ..GatewayConfig::default()
        };
        let body = format!(r#"{{"bio":"{}"}}"#, "x".repeat(64));
        let request = Request::post("/v1/profiles/candidate")
            .header("authorization", "Bearer test-token:u1")
            .header("content-type", "application/json")
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap();

        let response = router(config).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn cors_specific_origins() {
        let origins = vec![
            "http://localhost:3000".to_string(),
            "https://app.example.com".to_string(),
        ];
        let _layer = build_cors_layer(&origins);
    }
}

//! Liveness probe.

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct Health {
    /// Always `healthy` while the process serves requests.
    pub status: &'static str,
    /// Package name of the running binary.
    pub service: &'static str,
    /// Package version of the running binary.
    pub version: &'static str,
}

impl Health {
    const fn current() -> Self {
        Self {
            status: "healthy",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Report that the gateway is up. Needs no token and never touches the store.
pub async fn health() -> impl IntoResponse {
    Json(Health::current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn reports_package_identity() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let health = Health::current();
        assert_eq!(health.service, "jobboard-gateway");
        assert_eq!(health.status, "healthy");
    }
}

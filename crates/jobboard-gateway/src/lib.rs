//! HTTP gateway for jobboard role resolution.
//!
//! This crate provides the public-facing API for the multi-profile role logic.
//! It handles:
//!
//! - Firebase ID token authentication
//! - REST endpoints for accounts, profiles, login roles and role sessions
//! - Request size limits, timeouts and CORS
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   Clients                    │
//! └──────────────────────────────────────────────┘
//!                        │ HTTPS + Bearer token
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │               jobboard-gateway               │
//! │  ┌─────────────┐       ┌──────────────────┐  │
//! │  │   Auth      │       │   Router         │  │
//! │  │  Extractor  │       │   + Handlers     │  │
//! │  └─────────────┘       └──────────────────┘  │
//! └──────────────────────────────────────────────┘
//!               │                    │
//!               ▼                    ▼
//!        ┌─────────────┐      ┌─────────────┐
//!        │    Auth     │      │    Role     │
//!        │  (ID token) │      │   Manager   │
//!        └─────────────┘      └─────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobboard_gateway::{GatewayConfig, GatewayState, create_router};
//! use jobboard_roles::RoleManagerService;
//! use jobboard_auth::{JwksValidator, AuthConfig};
//! use jobboard_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/jobboard")?);
//! let roles = Arc::new(RoleManagerService::with_defaults(store));
//! let jwt_validator = Arc::new(JwksValidator::new(AuthConfig::default())?);
//!
//! let state = GatewayState::new(roles, jwt_validator, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ConfigError, GatewayConfig, StoreBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;

pub use auth::AuthUser;

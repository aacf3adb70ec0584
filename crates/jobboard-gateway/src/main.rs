//! Jobboard Gateway - HTTP API for role resolution
//!
//! This is the main entry point for the gateway service.
//!
//! # Dev Mode
//!
//! Build with `--features dev-mode` to use a mock token validator that
//! doesn't require network access to Google's key endpoint.
//! Use tokens in format: `test-token:<uid>[:<email>]`
//!
//! # Store Backend
//!
//! `STORE_BACKEND=memory` keeps everything in process, which is handy for
//! local front-end work. The default is `rocks`, stored under `DATA_DIR`.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(not(feature = "dev-mode"))]
use jobboard_auth::JwksValidator;
#[cfg(feature = "dev-mode")]
use jobboard_auth::MockJwtValidator;
use jobboard_auth::JwtValidator;
use jobboard_gateway::{create_router, GatewayConfig, GatewayState, StoreBackend};
use jobboard_roles::RoleManagerService;
use jobboard_store::{DocumentStore, MemoryStore, RocksStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Jobboard Gateway");

    let config = GatewayConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        store_backend = ?config.store_backend,
        firebase_project_id = %config.firebase_project_id,
        "Gateway configuration loaded"
    );

    // Initialize token validator
    #[cfg(feature = "dev-mode")]
    let jwt_validator = {
        tracing::warn!("DEV MODE ENABLED - using mock token validator");
        tracing::warn!("Use tokens in format: test-token:<uid>[:<email>]");
        Arc::new(MockJwtValidator::default())
    };

    #[cfg(not(feature = "dev-mode"))]
    let jwt_validator = Arc::new(JwksValidator::new(config.auth_config())?);
    tracing::info!("Token validator initialized");

    match config.store_backend {
        StoreBackend::Rocks => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            let store = Arc::new(RocksStore::open(&config.data_dir)?);
            serve(store, jwt_validator, config).await
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store - data is lost on exit");
            serve(Arc::new(MemoryStore::new()), jwt_validator, config).await
        }
    }
}

async fn serve<S, V>(
    store: Arc<S>,
    jwt_validator: Arc<V>,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: DocumentStore + 'static,
    V: JwtValidator + 'static,
{
    let roles = Arc::new(RoleManagerService::with_defaults(store));
    tracing::info!("Role manager initialized");

    let listen_addr = config.listen_addr.clone();
    let app = create_router(GatewayState::new(roles, jwt_validator, config));

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Gateway application state.

use std::sync::Arc;

use jobboard_auth::JwtValidator;
use jobboard_roles::RoleManager;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
///
/// This struct holds references to all services needed by the HTTP handlers.
pub struct GatewayState<R, V>
where
    R: RoleManager,
    V: JwtValidator,
{
    /// Role resolution and session operations.
    pub roles: Arc<R>,
    /// The ID token validator for authentication.
    pub jwt_validator: Arc<V>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<R, V> GatewayState<R, V>
where
    R: RoleManager,
    V: JwtValidator,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(roles: Arc<R>, jwt_validator: Arc<V>, config: GatewayConfig) -> Self {
        Self {
            roles,
            jwt_validator,
            config,
        }
    }
}

impl<R, V> Clone for GatewayState<R, V>
where
    R: RoleManager,
    V: JwtValidator,
{
    fn clone(&self) -> Self {
        Self {
            roles: Arc::clone(&self.roles),
            jwt_validator: Arc::clone(&self.jwt_validator),
            config: self.config.clone(),
        }
    }
}

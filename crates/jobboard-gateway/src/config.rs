//! Gateway configuration types.
//!
//! This module defines configuration structures for the HTTP gateway. Values
//! are taken from the environment in `main`; every field has a default.

use std::str::FromStr;
use std::time::Duration;

use jobboard_auth::{AuthConfig, FIREBASE_JWKS_URL};
use serde::Deserialize;
use thiserror::Error;

/// A configuration value that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid value for {key}: {value}")]
pub struct ConfigError {
    /// The environment variable.
    pub key: &'static str,
    /// The rejected value.
    pub value: String,
}

/// Which document store backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Persistent `RocksDB` store under `data_dir`.
    #[default]
    Rocks,
    /// In-process store; everything is lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rocks" | "rocksdb" => Ok(Self::Rocks),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError {
                key: "STORE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Directory of the `RocksDB` store.
    #[serde(default = "GatewayConfig::default_data_dir")]
    pub data_dir: String,

    /// Store backend.
    #[serde(default)]
    pub store_backend: StoreBackend,

    /// Firebase project whose ID tokens are accepted.
    #[serde(default = "GatewayConfig::default_project_id")]
    pub firebase_project_id: String,

    /// JWKS endpoint for the token signing keys.
    #[serde(default = "GatewayConfig::default_jwks_url")]
    pub firebase_jwks_url: String,

    /// Allowed CORS origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    fn default_data_dir() -> String {
        "/data/jobboard".to_string()
    }

    fn default_project_id() -> String {
        AuthConfig::default().project_id
    }

    fn default_jwks_url() -> String {
        FIREBASE_JWKS_URL.to_string()
    }

    const fn default_max_body() -> usize {
        256 * 1024 // profile documents are small
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    /// Build a configuration from environment-style lookups.
    ///
    /// Recognised keys: `LISTEN_ADDR`, `DATA_DIR`, `STORE_BACKEND`,
    /// `FIREBASE_PROJECT_ID`, `FIREBASE_JWKS_URL`, `CORS_ORIGINS`
    /// (comma-separated). Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `STORE_BACKEND` is not `rocks` or `memory`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("LISTEN_ADDR") {
            config.listen_addr = v;
        }
        if let Some(v) = lookup("DATA_DIR") {
            config.data_dir = v;
        }
        if let Some(v) = lookup("STORE_BACKEND") {
            config.store_backend = v.parse()?;
        }
        if let Some(v) = lookup("FIREBASE_PROJECT_ID") {
            config.firebase_project_id = v;
        }
        if let Some(v) = lookup("FIREBASE_JWKS_URL") {
            config.firebase_jwks_url = v;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            config.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }

    /// Build a configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`from_lookup`](Self::from_lookup).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The token validation settings.
    #[must_use]
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            project_id: self.firebase_project_id.clone(),
            jwks_url: self.firebase_jwks_url.clone(),
            ..AuthConfig::default()
        }
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            data_dir: Self::default_data_dir(),
            store_backend: StoreBackend::default(),
            firebase_project_id: Self::default_project_id(),
            firebase_jwks_url: Self::default_jwks_url(),
            cors_origins: vec!["*".to_string()],
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

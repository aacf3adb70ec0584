//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! Firebase signs ID tokens with rotating RSA keys published as a JWK set.
//! Keys are fetched on first use, cached for the configured interval, and
//! refetched early when a token names a key id the cache does not know.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use base64::prelude::*;
use jsonwebtoken::DecodingKey;
use parking_lot::RwLock;
use serde::Deserialize;

use crate::error::{AuthError, Result};
use crate::AuthConfig;

/// Smallest accepted RSA modulus, in bytes (2048 bits).
const MIN_MODULUS_BYTES: usize = 256;

/// JWKS response from the key endpoint.
#[derive(Debug, Deserialize)]
pub struct JwksResponse {
    /// The list of keys.
    pub keys: Vec<JwkKey>,
}

/// A single JWK (JSON Web Key).
#[derive(Debug, Deserialize)]
pub struct JwkKey {
    /// Key type (`RSA` for Firebase).
    pub kty: String,
    /// RSA modulus (base64url encoded).
    pub n: Option<String>,
    /// RSA public exponent (base64url encoded).
    pub e: Option<String>,
    /// Key ID.
    pub kid: Option<String>,
    /// Key use (e.g., "sig").
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    /// Algorithm (e.g., `RS256`).
    pub alg: Option<String>,
}

/// Cached JWKS keys with expiration.
struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

/// JWKS key provider that fetches and caches keys.
pub struct JwksProvider {
    config: AuthConfig,
    client: reqwest::Client,
    cache: RwLock<CachedKeys>,
}

impl JwksProvider {
    /// Create a new JWKS provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if the HTTP client cannot be created.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            cache: RwLock::new(CachedKeys {
                keys: HashMap::new(),
                fetched_at: None,
            }),
        })
    }

    /// Get a decoding key by key ID, fetching from JWKS if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not found or JWKS fetch fails.
    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey> {
        {
            let cache = self.cache.read();
            let refresh_interval = Duration::from_secs(self.config.jwks_refresh_seconds);
            let fresh = cache
                .fetched_at
                .is_some_and(|at| at.elapsed() < refresh_interval);
            if fresh {
                if let Some(key) = cache.keys.get(kid) {
                    return Ok(key.clone());
                }
            }
        }

        self.refresh_keys().await?;

        let cache = self.cache.read();
        cache
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| AuthError::KeyNotFound(kid.to_string()))
    }

    /// Number of keys currently cached.
    #[must_use]
    pub fn cached_key_count(&self) -> usize {
        self.cache.read().keys.len()
    }

    /// Refresh the JWKS cache by fetching from the server.
    async fn refresh_keys(&self) -> Result<()> {
        let jwks_url = &self.config.jwks_url;
        tracing::debug!(url = %jwks_url, "Fetching JWKS");

        let response: JwksResponse = self
            .client
            .get(jwks_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AuthError::JwksFetchFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::JwksFetchFailed(e.to_string()))?;

        let mut new_keys = HashMap::new();

        for key in response.keys {
            let Some(kid) = key.kid.clone() else {
                continue;
            };
            match Self::parse_key(&key) {
                Ok(Some(decoding_key)) => {
                    new_keys.insert(kid, decoding_key);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(kid = %kid, error = %e, "Skipping malformed JWK"),
            }
        }

        tracing::debug!(count = new_keys.len(), "Cached JWKS keys");

        let mut cache = self.cache.write();
        cache.keys = new_keys;
        cache.fetched_at = Some(Instant::now());

        Ok(())
    }

    /// Parse a JWK into a `DecodingKey`.
    fn parse_key(key: &JwkKey) -> Result<Option<DecodingKey>> {
        if key.kty != "RSA" {
            tracing::warn!(kty = %key.kty, "Unsupported key type");
            return Ok(None);
        }
        if let Some(alg) = key.alg.as_deref().filter(|alg| *alg != "RS256") {
            tracing::warn!(alg = alg, "Unsupported RSA algorithm");
            return Ok(None);
        }

        let n = key
            .n
            .as_deref()
            .ok_or_else(|| AuthError::InvalidToken("missing n parameter".to_string()))?;
        let e = key
            .e
            .as_deref()
            .ok_or_else(|| AuthError::InvalidToken("missing e parameter".to_string()))?;

        let modulus = BASE64_URL_SAFE_NO_PAD
            .decode(n)
            .map_err(|err| AuthError::InvalidToken(format!("invalid base64: {err}")))?;
        if modulus.len() < MIN_MODULUS_BYTES {
            tracing::warn!(bits = modulus.len() * 8, "Skipping short RSA key");
            return Ok(None);
        }

        DecodingKey::from_rsa_components(n, e)
            .map(Some)
            .map_err(|err| AuthError::InvalidToken(format!("invalid RSA key: {err}")))
    }

    /// Force a refresh of the JWKS cache.
    ///
    /// This is useful when a key rotation is detected.
    ///
    /// # Errors
    ///
    /// Returns an error if the JWKS fetch fails.
    pub async fn force_refresh(&self) -> Result<()> {
        self.refresh_keys().await
    }
}

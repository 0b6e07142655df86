use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::config::JwksConfig;
use crate::error::AuthError;
use crate::resolver::KeyResolver;

/// Raw JWK structure as returned by a key discovery endpoint.
/// Only the fields needed to build an RSA verification key are captured.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct Jwk {
    /// Key ID
    kid: Option<String>,
    /// Key type (e.g. "RSA")
    kty: String,
    /// Algorithm (e.g. "RS256")
    #[serde(default)]
    alg: Option<String>,
    /// RSA modulus (base64url)
    #[serde(default)]
    n: Option<String>,
    /// RSA exponent (base64url)
    #[serde(default)]
    e: Option<String>,
}

/// JWKS response envelope.
#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

/// Cached JWK entry. Raw components are kept so that an entry with an
/// unsupported key type fails the lookup that needs it, not the whole
/// refresh.
#[derive(Debug, Clone)]
struct CachedJwk {
    kty: String,
    n: Option<String>,
    e: Option<String>,
}

impl CachedJwk {
    fn to_decoding_key(&self) -> Result<DecodingKey, AuthError> {
        match self.kty.as_str() {
            "RSA" => {
                let n = self.n.as_deref().ok_or_else(|| {
                    AuthError::KeyResolutionFailed("RSA key missing 'n' component".into())
                })?;
                let e = self.e.as_deref().ok_or_else(|| {
                    AuthError::KeyResolutionFailed("RSA key missing 'e' component".into())
                })?;
                DecodingKey::from_rsa_components(n, e).map_err(|err| {
                    AuthError::KeyResolutionFailed(format!(
                        "failed to construct RSA verification key: {err}"
                    ))
                })
            }
            other => Err(AuthError::KeyResolutionFailed(format!(
                "unsupported key type: {other}"
            ))),
        }
    }
}

/// Cached state behind the lock.
struct CacheInner {
    keys: HashMap<String, CachedJwk>,
    last_refresh: Option<Instant>,
    last_refresh_attempt: Option<Instant>,
}

/// Key resolver backed by a remote JWKS endpoint.
///
/// Keys are fetched from the configured discovery URI and cached by `kid`.
/// A lookup for an unknown `kid` triggers a refresh before failing, so key
/// rollover at the issuer is picked up without restarting. Refresh attempts
/// are throttled by a minimum interval, and every fetch carries a timeout so
/// an unreachable key source fails the lookup instead of hanging.
pub struct JwksKeyResolver {
    inner: Arc<RwLock<CacheInner>>,
    config: JwksConfig,
    client: reqwest::Client,
    refresh_lock: Mutex<()>,
}

impl JwksKeyResolver {
    /// Create a new resolver and perform an initial fetch of the key set.
    pub async fn new(config: JwksConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| {
                AuthError::KeyResolutionFailed(format!("failed to build HTTP client: {e}"))
            })?;
        let resolver = Self {
            inner: Arc::new(RwLock::new(CacheInner {
                keys: HashMap::new(),
                last_refresh: None,
                last_refresh_attempt: None,
            })),
            config,
            client,
            refresh_lock: Mutex::new(()),
        };
        resolver.refresh().await?;
        Ok(resolver)
    }

    /// Retrieve the verification key for the given `kid`.
    ///
    /// If the `kid` is not in the cache, the cache is refreshed first.
    /// If still not found after refresh, returns `AuthError::KeyNotFound`.
    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let ttl = Duration::from_secs(self.config.cache_ttl_secs);

        // First, try cache. If stale or missing, attempt a refresh.
        let mut needs_refresh = false;
        let mut force_refresh = false;
        {
            let cache = self.inner.read().await;
            if let Some(jwk) = cache.keys.get(kid) {
                if is_stale(cache.last_refresh, ttl) {
                    needs_refresh = true;
                    force_refresh = false;
                } else {
                    return jwk.to_decoding_key();
                }
            } else {
                needs_refresh = true;
                force_refresh = true;
            }
        }

        if needs_refresh {
            self.try_refresh(force_refresh).await?;
        }

        let cache = self.inner.read().await;
        cache
            .keys
            .get(kid)
            .ok_or_else(|| AuthError::KeyNotFound(kid.to_string()))?
            .to_decoding_key()
    }

    /// Force a refresh of the key set from the discovery endpoint.
    async fn refresh(&self) -> Result<(), AuthError> {
        let response = self
            .client
            .get(&self.config.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::KeyResolutionFailed(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| AuthError::KeyResolutionFailed(e.to_string()))?;

        let jwks: JwksResponse = response.json().await.map_err(|e| {
            AuthError::KeyResolutionFailed(format!("failed to parse JWKS: {e}"))
        })?;

        let mut keys = HashMap::new();
        for jwk in jwks.keys {
            if let Some(kid) = &jwk.kid {
                let cached = CachedJwk {
                    kty: jwk.kty.clone(),
                    n: jwk.n.clone(),
                    e: jwk.e.clone(),
                };
                keys.insert(kid.clone(), cached);
            }
        }
        debug!(count = keys.len(), url = %self.config.jwks_url, "refreshed key set");

        let now = Instant::now();
        let mut cache = self.inner.write().await;
        cache.keys = keys;
        cache.last_refresh = Some(now);
        cache.last_refresh_attempt = Some(now);

        Ok(())
    }

    async fn try_refresh(&self, force: bool) -> Result<(), AuthError> {
        let ttl = Duration::from_secs(self.config.cache_ttl_secs);
        let min_interval = Duration::from_secs(self.config.min_refresh_interval_secs);

        {
            let cache = self.inner.read().await;
            if !force && !is_stale(cache.last_refresh, ttl) {
                return Ok(());
            }
            if !can_attempt(cache.last_refresh_attempt, min_interval) {
                return Ok(());
            }
        }

        let _guard = self.refresh_lock.lock().await;

        {
            let cache = self.inner.read().await;
            if !force && !is_stale(cache.last_refresh, ttl) {
                return Ok(());
            }
            if !can_attempt(cache.last_refresh_attempt, min_interval) {
                return Ok(());
            }
        }

        {
            let mut cache = self.inner.write().await;
            cache.last_refresh_attempt = Some(Instant::now());
        }

        self.refresh().await
    }
}

impl KeyResolver for JwksKeyResolver {
    fn resolve_key(
        &self,
        kid: &str,
    ) -> impl Future<Output = Result<DecodingKey, AuthError>> + Send {
        self.get_key(kid)
    }
}

fn is_stale(last_refresh: Option<Instant>, ttl: Duration) -> bool {
    match last_refresh {
        None => true,
        Some(ts) => ts.elapsed() >= ttl,
    }
}

fn can_attempt(last_attempt: Option<Instant>, min_interval: Duration) -> bool {
    match last_attempt {
        None => true,
        Some(ts) => ts.elapsed() >= min_interval,
    }
}

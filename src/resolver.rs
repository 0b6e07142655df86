use std::collections::HashMap;
use std::future::Future;

use jsonwebtoken::DecodingKey;

use crate::error::AuthError;

/// Capability for looking up a verification key by its key ID.
///
/// The validator depends only on this contract. Production implementations
/// fetch a published key set over the network and cache it
/// ([`JwksKeyResolver`](crate::jwks::JwksKeyResolver)); tests substitute a
/// fixed in-memory key set ([`StaticKeyResolver`]).
///
/// Implementations may block on I/O; callers should treat key resolution as
/// a potentially blocking step and apply timeouts at this boundary.
pub trait KeyResolver: Send + Sync {
    /// Resolve the public key for the given `kid`.
    ///
    /// Returns [`AuthError::KeyNotFound`] when the key set has no matching
    /// entry, and [`AuthError::KeyResolutionFailed`] when the key set itself
    /// cannot be retrieved.
    fn resolve_key(
        &self,
        kid: &str,
    ) -> impl Future<Output = Result<DecodingKey, AuthError>> + Send;
}

/// Key resolver backed by a fixed in-memory key set.
///
/// No I/O is performed. Intended for tests and for deployments where the
/// signing keys are provisioned out of band.
#[derive(Clone, Default)]
pub struct StaticKeyResolver {
    keys: HashMap<String, DecodingKey>,
}

impl StaticKeyResolver {
    /// Create an empty resolver. Every lookup fails with `KeyNotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key under the given `kid`, replacing any previous entry.
    pub fn with_key(mut self, kid: impl Into<String>, key: DecodingKey) -> Self {
        self.keys.insert(kid.into(), key);
        self
    }
}

impl KeyResolver for StaticKeyResolver {
    fn resolve_key(
        &self,
        kid: &str,
    ) -> impl Future<Output = Result<DecodingKey, AuthError>> + Send {
        let result = self
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| AuthError::KeyNotFound(kid.to_string()));
        std::future::ready(result)
    }
}

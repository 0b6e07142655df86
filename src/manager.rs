use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, get_current_timestamp, Validation};
use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::principal::Principal;
use crate::resolver::KeyResolver;

/// Token validator and principal builder.
///
/// Holds only immutable configuration and a [`KeyResolver`]; each call is
/// independent, so one manager can be shared across concurrent callers
/// (wrap it in an `Arc`). Key resolution may block on I/O, so
/// [`build_principal`](Self::build_principal) should be treated as a
/// potentially blocking operation.
///
/// # Example
///
/// ```ignore
/// let resolver = JwksKeyResolver::new(JwksConfig::new(discovery_uri)).await?;
/// let manager = PrincipalManager::new(
///     resolver,
///     AuthConfig::new(client_id).with_app_id_uri(app_id_uri),
/// );
/// let principal = manager.build_principal(&token).await?;
/// ```
pub struct PrincipalManager<R: KeyResolver> {
    resolver: R,
    config: AuthConfig,
}

impl<R: KeyResolver> PrincipalManager<R> {
    /// Create a new manager from a key resolver and validation config.
    pub fn new(resolver: R, config: AuthConfig) -> Self {
        Self { resolver, config }
    }

    /// Returns the validation configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Validate a serialized token and return the raw claim set.
    ///
    /// This performs, in order:
    /// 1. Header decoding to extract `kid` and algorithm
    /// 2. Algorithm allow-list check
    /// 3. Key resolution by `kid`
    /// 4. Signature verification
    /// 5. Claim validation (audience, issuer, exp/nbf/iat)
    ///
    /// Claim values are untrusted until step 4 succeeds, so claim validation
    /// never runs before the signature is verified.
    pub async fn validate_claims(&self, token: &str) -> Result<serde_json::Value, AuthError> {
        let header = decode_header(token)
            .map_err(|e| AuthError::MalformedToken(format!("failed to decode header: {e}")))?;

        let algorithm = header.alg;
        debug!(?algorithm, kid = ?header.kid, "decoded token header");

        if self.config.allowed_algorithms.is_empty() {
            return Err(AuthError::ValidationFailed(
                "no allowed signing algorithms configured".into(),
            ));
        }

        if !self.config.allowed_algorithms.contains(&algorithm) {
            return Err(AuthError::ValidationFailed(format!(
                "disallowed signing algorithm: {algorithm:?}"
            )));
        }

        let kid = header
            .kid
            .as_deref()
            .ok_or_else(|| AuthError::MalformedToken("token header missing 'kid' field".into()))?;
        let decoding_key = self.resolver.resolve_key(kid).await?;

        let mut validation = Validation::new(algorithm);
        validation.algorithms = self.config.allowed_algorithms.clone();
        validation.set_audience(&self.config.accepted_audiences());
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        // The audience claim is mandatory; exp is not (some issuers omit it).
        validation.set_required_spec_claims(&["aud"]);
        validation.leeway = self.config.clock_skew_secs;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        let token_data =
            decode::<serde_json::Value>(token, &decoding_key, &validation).map_err(|e| {
                let err = match e.kind() {
                    // Base64 failures at this point are altered or truncated
                    // payload/signature bytes; the header already parsed.
                    ErrorKind::InvalidSignature | ErrorKind::Base64(_) => {
                        AuthError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAudience => AuthError::InvalidAudience,
                    ErrorKind::MissingRequiredClaim(claim) if claim == "aud" => {
                        AuthError::InvalidAudience
                    }
                    ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                    ErrorKind::InvalidAlgorithm => AuthError::ValidationFailed(
                        "signing algorithm does not match the verification key".into(),
                    ),
                    _ => AuthError::MalformedToken(e.to_string()),
                };
                if matches!(err, AuthError::InvalidSignature) {
                    warn!(kid = %kid, "signature verification failed; possible token tampering");
                } else {
                    warn!(error = %err, "token validation failed");
                }
                err
            })?;

        self.check_issue_time(&token_data.claims)?;

        let sub = token_data
            .claims
            .get("sub")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        debug!(sub = %sub, "token validated");

        Ok(token_data.claims)
    }

    /// Validate a serialized token and build the authenticated [`Principal`].
    ///
    /// The principal is constructed only after every check in
    /// [`validate_claims`](Self::validate_claims) has passed.
    pub async fn build_principal(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.validate_claims(token).await?;
        Principal::from_claims(claims, token.to_string())
    }

    /// The `iat` claim is not validated by the JWT library, so enforce it
    /// here: a token must not claim to have been issued in the future beyond
    /// the allowed clock skew.
    fn check_issue_time(&self, claims: &serde_json::Value) -> Result<(), AuthError> {
        if let Some(iat) = claims.get("iat").and_then(|v| v.as_i64()) {
            let now = get_current_timestamp() as i64;
            if iat > now + self.config.clock_skew_secs as i64 {
                warn!(iat, now, "token issue time is in the future");
                return Err(AuthError::TokenExpired);
            }
        }
        Ok(())
    }
}

use jsonwebtoken::Algorithm;

/// Default allowed clock skew for time-validity checks: 5 minutes.
pub const DEFAULT_CLOCK_SKEW_SECS: u64 = 300;

/// Validator configuration: the accepted audience set and claim checks.
///
/// The accepted audiences are derived from the registered client ID and,
/// when set, the application ID URI. A token is accepted when its `aud`
/// claim intersects this set by exact string match.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Registered client (application) ID. Always an accepted audience.
    pub client_id: String,

    /// Application ID URI (e.g. `https://contoso.example.com/my-api`).
    /// Accepted as an audience when set.
    pub app_id_uri: Option<String>,

    /// Expected issuer for the `iss` claim. Checked only when set.
    pub issuer: Option<String>,

    /// Allowed signing algorithms. Tokens using other algorithms are
    /// rejected before key resolution. Default: RS256 only.
    pub allowed_algorithms: Vec<Algorithm>,

    /// Allowed clock skew in seconds for `exp`/`nbf`/`iat` checks.
    pub clock_skew_secs: u64,
}

impl AuthConfig {
    /// Create a config accepting only `client_id` as audience, RS256 only,
    /// with the default clock skew.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            app_id_uri: None,
            issuer: None,
            allowed_algorithms: vec![Algorithm::RS256],
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
        }
    }

    /// Also accept the application ID URI as an audience.
    pub fn with_app_id_uri(mut self, uri: impl Into<String>) -> Self {
        self.app_id_uri = Some(uri.into());
        self
    }

    /// Require the `iss` claim to equal the given issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the allowed signing algorithms. An empty list causes every
    /// validation to fail.
    pub fn with_allowed_algorithms(
        mut self,
        algorithms: impl IntoIterator<Item = Algorithm>,
    ) -> Self {
        self.allowed_algorithms = algorithms.into_iter().collect();
        self
    }

    /// Convenience method to allow a single algorithm.
    pub fn with_allowed_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.allowed_algorithms = vec![algorithm];
        self
    }

    /// Set the allowed clock skew in seconds.
    pub fn with_clock_skew(mut self, skew_secs: u64) -> Self {
        self.clock_skew_secs = skew_secs;
        self
    }

    /// The exact audience strings this validator accepts.
    pub fn accepted_audiences(&self) -> Vec<&str> {
        let mut audiences = vec![self.client_id.as_str()];
        if let Some(uri) = &self.app_id_uri {
            audiences.push(uri.as_str());
        }
        audiences
    }
}

/// Configuration for the JWKS-backed key resolver.
#[derive(Clone, Debug)]
pub struct JwksConfig {
    /// URL of the key discovery endpoint
    /// (e.g. `https://login.example.net/common/discovery/keys`).
    pub jwks_url: String,

    /// Cache TTL in seconds (default: 3600).
    pub cache_ttl_secs: u64,

    /// Minimum interval between refresh attempts in seconds (default: 10).
    pub min_refresh_interval_secs: u64,

    /// HTTP timeout for a key-set fetch in seconds (default: 10). A stale or
    /// unreachable key source fails the lookup instead of hanging.
    pub fetch_timeout_secs: u64,
}

impl JwksConfig {
    pub fn new(jwks_url: impl Into<String>) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            cache_ttl_secs: 3600,
            min_refresh_interval_secs: 10,
            fetch_timeout_secs: 10,
        }
    }

    /// Set the cache TTL in seconds.
    pub fn with_cache_ttl(mut self, ttl_secs: u64) -> Self {
        self.cache_ttl_secs = ttl_secs;
        self
    }

    /// Set the minimum interval between refresh attempts.
    pub fn with_min_refresh_interval(mut self, interval_secs: u64) -> Self {
        self.min_refresh_interval_secs = interval_secs;
        self
    }

    /// Set the fetch timeout in seconds.
    pub fn with_fetch_timeout(mut self, timeout_secs: u64) -> Self {
        self.fetch_timeout_secs = timeout_secs;
        self
    }
}

/// Errors raised while validating a token and building a principal.
///
/// Display strings are stable: callers match on substrings such as
/// "Invalid token audience." and "Invalid signature".
#[derive(Debug)]
pub enum AuthError {
    /// The token is structurally invalid (not compact JWS, unparseable header
    /// or claim set).
    MalformedToken(String),

    /// The key set contains no entry for the key ID named in the token header.
    KeyNotFound(String),

    /// The key set could not be retrieved or a matching entry could not be
    /// turned into a verification key.
    KeyResolutionFailed(String),

    /// Signature verification failed. Fatal for this token.
    InvalidSignature,

    /// The token's audience does not intersect the accepted audience set.
    InvalidAudience,

    /// The token's issuer does not match the configured expected issuer.
    InvalidIssuer,

    /// The token is outside its time validity window (expired, or issued in
    /// the future beyond the allowed clock skew).
    TokenExpired,

    /// Residual claim or configuration failure (disallowed algorithm,
    /// missing required claim, unsupported key type).
    ValidationFailed(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MalformedToken(msg) => write!(f, "Malformed token: {msg}"),
            AuthError::KeyNotFound(kid) => write!(f, "No signing key found for kid: {kid}"),
            AuthError::KeyResolutionFailed(msg) => write!(f, "Key resolution failed: {msg}"),
            AuthError::InvalidSignature => write!(f, "Invalid signature"),
            AuthError::InvalidAudience => write!(f, "Invalid token audience."),
            AuthError::InvalidIssuer => write!(f, "Invalid token issuer"),
            AuthError::TokenExpired => write!(f, "Token expired"),
            AuthError::ValidationFailed(msg) => write!(f, "Token validation failed: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// Message safe to return to an unauthenticated caller. Detail stays in
    /// logs.
    pub fn public_message(&self) -> &'static str {
        "Unauthorized"
    }
}

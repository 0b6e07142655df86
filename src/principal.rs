use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// The authenticated identity produced from a validated token.
///
/// A `Principal` is only ever constructed after signature verification and
/// audience validation have both succeeded; no partially validated principal
/// is exposed. The value is plain data, owned by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Subject claim ("sub") - unique identifier of the authenticated party.
    pub subject: String,

    /// Issuer claim ("iss") - the authority that signed the token.
    pub issuer: String,

    /// Full validated claim set, for access to non-standard claims.
    pub claims: serde_json::Value,

    /// The serialized token this principal was built from.
    pub raw_token: String,
}

impl Principal {
    /// Build a `Principal` from a validated claim set.
    ///
    /// Fails when the claim set lacks the `sub` or `iss` claim. Claims must
    /// already have passed signature and audience validation; this
    /// constructor performs no cryptographic checks.
    pub fn from_claims(claims: serde_json::Value, raw_token: String) -> Result<Self, AuthError> {
        let subject = claims
            .get("sub")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AuthError::ValidationFailed("missing 'sub' claim".into()))?
            .to_string();

        let issuer = claims
            .get("iss")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AuthError::ValidationFailed("missing 'iss' claim".into()))?
            .to_string();

        Ok(Self {
            subject,
            issuer,
            claims,
            raw_token,
        })
    }

    /// Look up a claim by name.
    pub fn claim(&self, name: &str) -> Option<&serde_json::Value> {
        self.claims.get(name)
    }

    /// Whether the claim set contains the given claim.
    pub fn has_claim(&self, name: &str) -> bool {
        self.claims.get(name).is_some()
    }
}

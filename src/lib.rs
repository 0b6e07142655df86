//! JWT validation against an Azure AD-style identity provider.
//!
//! A [`PrincipalManager`] takes a compact serialized token, resolves the
//! signing key by key ID through a [`KeyResolver`], verifies the signature,
//! validates claims (audience, issuer, time validity), and produces an
//! authenticated [`Principal`]. Key resolution is pluggable: use
//! [`JwksKeyResolver`] against a key discovery endpoint in production, or
//! [`StaticKeyResolver`] with a fixed key set in tests.

pub mod config;
pub mod error;
pub mod jwks;
pub mod manager;
pub mod principal;
pub mod resolver;

// Re-export primary public types for convenience.
pub use config::{AuthConfig, JwksConfig, DEFAULT_CLOCK_SKEW_SECS};
pub use error::AuthError;
pub use jwks::JwksKeyResolver;
pub use manager::PrincipalManager;
pub use principal::Principal;
pub use resolver::{KeyResolver, StaticKeyResolver};

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use crate::{AuthConfig, AuthError, JwksConfig, JwksKeyResolver, KeyResolver, Principal, PrincipalManager, StaticKeyResolver};
}

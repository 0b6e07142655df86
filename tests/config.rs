use jsonwebtoken::Algorithm;

use aad_principal::config::{AuthConfig, JwksConfig, DEFAULT_CLOCK_SKEW_SECS};

#[test]
fn auth_config_defaults() {
    let config = AuthConfig::new("my-client-id");
    assert_eq!(config.client_id, "my-client-id");
    assert!(config.app_id_uri.is_none());
    assert!(config.issuer.is_none());
    assert_eq!(config.allowed_algorithms, vec![Algorithm::RS256]);
    assert_eq!(config.clock_skew_secs, DEFAULT_CLOCK_SKEW_SECS);
}

#[test]
fn accepted_audiences_client_id_only() {
    let config = AuthConfig::new("my-client-id");
    assert_eq!(config.accepted_audiences(), vec!["my-client-id"]);
}

#[test]
fn accepted_audiences_includes_app_id_uri() {
    let config = AuthConfig::new("my-client-id").with_app_id_uri("api://my-app");
    assert_eq!(config.accepted_audiences(), vec!["my-client-id", "api://my-app"]);
}

#[test]
fn auth_config_builders() {
    let config = AuthConfig::new("c")
        .with_issuer("https://sts.windows.net/tenant/")
        .with_clock_skew(120)
        .with_allowed_algorithm(Algorithm::RS384);
    assert_eq!(config.issuer.as_deref(), Some("https://sts.windows.net/tenant/"));
    assert_eq!(config.clock_skew_secs, 120);
    assert_eq!(config.allowed_algorithms, vec![Algorithm::RS384]);
}

#[test]
fn auth_config_multiple_algorithms() {
    let config =
        AuthConfig::new("c").with_allowed_algorithms([Algorithm::RS256, Algorithm::RS512]);
    assert_eq!(config.allowed_algorithms.len(), 2);
}

#[test]
fn jwks_config_defaults() {
    let config = JwksConfig::new("https://login.example.net/common/discovery/keys");
    assert_eq!(config.jwks_url, "https://login.example.net/common/discovery/keys");
    assert_eq!(config.cache_ttl_secs, 3600);
    assert_eq!(config.min_refresh_interval_secs, 10);
    assert_eq!(config.fetch_timeout_secs, 10);
}

#[test]
fn jwks_config_builders() {
    let config = JwksConfig::new("url")
        .with_cache_ttl(300)
        .with_min_refresh_interval(5)
        .with_fetch_timeout(2);
    assert_eq!(config.cache_ttl_secs, 300);
    assert_eq!(config.min_refresh_interval_secs, 5);
    assert_eq!(config.fetch_timeout_secs, 2);
}

#[test]
fn configs_are_cloneable() {
    let config = AuthConfig::new("c").with_app_id_uri("api://a");
    let cloned = config.clone();
    assert_eq!(cloned.client_id, "c");
    assert_eq!(cloned.app_id_uri.as_deref(), Some("api://a"));
}

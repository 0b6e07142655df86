use serde_json::json;

use aad_principal::{AuthError, Principal};

fn claims() -> serde_json::Value {
    json!({
        "sub": "foo",
        "iss": "https://sts.windows.net/test-tenant/",
        "aud": "test-client-id",
        "iat": 1700000000,
        "upn": "foo@example.com",
    })
}

#[test]
fn built_from_claims() {
    let principal = Principal::from_claims(claims(), "a.b.c".into()).unwrap();
    assert_eq!(principal.subject, "foo");
    assert_eq!(principal.issuer, "https://sts.windows.net/test-tenant/");
    assert_eq!(principal.raw_token, "a.b.c");
}

#[test]
fn missing_subject_rejected() {
    let mut c = claims();
    c.as_object_mut().unwrap().remove("sub");
    let err = Principal::from_claims(c, "a.b.c".into()).unwrap_err();
    assert!(matches!(err, AuthError::ValidationFailed(_)));
    assert!(err.to_string().contains("missing 'sub' claim"));
}

#[test]
fn missing_issuer_rejected() {
    let mut c = claims();
    c.as_object_mut().unwrap().remove("iss");
    let err = Principal::from_claims(c, "a.b.c".into()).unwrap_err();
    assert!(err.to_string().contains("missing 'iss' claim"));
}

#[test]
fn claim_lookup() {
    let principal = Principal::from_claims(claims(), "a.b.c".into()).unwrap();
    assert_eq!(principal.claim("upn").unwrap(), "foo@example.com");
    assert!(principal.claim("roles").is_none());
    assert!(principal.has_claim("aud"));
    assert!(!principal.has_claim("email"));
}

#[test]
fn principal_round_trips_through_serde() {
    let principal = Principal::from_claims(claims(), "a.b.c".into()).unwrap();
    let encoded = serde_json::to_string(&principal).unwrap();
    let decoded: Principal = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, principal);
}

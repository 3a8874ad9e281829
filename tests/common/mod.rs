//! Shared test fixtures and helper utilities.
//!
//! Provides key stores, app state, and token verification helpers for
//! both the HTTP and CLI integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde_json::Value;

use jwt_mock::server::AppState;
use jwt_mock::{ClaimsPolicy, KeyOptions, KeyStore, SigningAlgorithm, TokenBuilder};

/// Matches a compact JWT: three non-empty unpadded base64url segments.
pub const COMPACT_JWT_PATTERN: &str = r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$";

/// A key store holding one freshly generated ES256 key.
pub fn es256_store() -> KeyStore {
    KeyStore::initialize(&KeyOptions {
        algorithm: SigningAlgorithm::Es256,
        ..KeyOptions::default()
    })
    .unwrap()
}

/// App state over a fresh ES256 key store.
pub fn es256_state(policy: ClaimsPolicy) -> Arc<AppState> {
    Arc::new(AppState::new(es256_store(), TokenBuilder::new(policy)))
}

/// App state over a fresh RS256 key store.
pub fn rs256_state() -> Arc<AppState> {
    let store = KeyStore::initialize(&KeyOptions::default()).unwrap();
    Arc::new(AppState::new(store, TokenBuilder::default()))
}

/// Verify `token` against the key in `jwks` named by its `kid` header and
/// return the claims. Panics if verification fails.
pub fn verify(token: &str, jwks: &JwkSet) -> Value {
    let header = decode_header(token).unwrap();
    let kid = header.kid.as_deref().expect("token header has no kid");
    let jwk = jwks.find(kid).expect("kid not in key set");
    let key = DecodingKey::from_jwk(jwk).unwrap();

    let mut validation = Validation::new(header.alg);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    decode::<Value>(token, &key, &validation).unwrap().claims
}

/// Decode the payload segment of a token without verifying it.
pub fn decode_payload(token: &str) -> Value {
    let payload = token.split('.').nth(1).expect("token has no payload segment");
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap()
}

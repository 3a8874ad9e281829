//! Token construction and signing.
//!
//! Produces compact JWS tokens: base64url(header) `.` base64url(claims) `.`
//! base64url(signature). The header always names the signing key's `kid`
//! so verifiers can select the matching entry of the published key set.

use chrono::{DateTime, Utc};
use jsonwebtoken::Header;
use serde::Serialize;
use serde_json::Value;

use crate::core::claims::{Claims, ClaimsPolicy};
use crate::core::finite;
use crate::core::keys::KeyPair;
use crate::error::MockError;

/// Signs caller claims with a key pair, applying a [`ClaimsPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenBuilder {
    policy: ClaimsPolicy,
}

impl TokenBuilder {
    /// Create a builder that injects timing claims according to `policy`.
    pub fn new(policy: ClaimsPolicy) -> Self {
        Self { policy }
    }

    /// Sign `claims` with `key` using the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Signing`] if the claims cannot be serialized to a
    /// JSON object or the signature cannot be computed.
    pub fn sign<C>(&self, claims: &C, key: &KeyPair) -> Result<String, MockError>
    where
        C: Serialize + ?Sized,
    {
        self.sign_at(claims, key, Utc::now())
    }

    /// Sign `claims` with `key`, using `now` for injected timing claims.
    ///
    /// # Errors
    ///
    /// Same as [`TokenBuilder::sign`].
    pub fn sign_at<C>(&self, claims: &C, key: &KeyPair, now: DateTime<Utc>) -> Result<String, MockError>
    where
        C: Serialize + ?Sized,
    {
        let mut claims = to_claims(claims)?;
        self.policy.apply(&mut claims, now);

        let mut header = Header::new(key.algorithm().jwt_algorithm());
        header.kid = Some(key.id().to_string());

        let token = jsonwebtoken::encode(&header, &claims, key.encoding_key())
            .map_err(|e| MockError::Signing {
                reason: e.to_string(),
            })?;

        tracing::debug!(kid = key.id(), alg = %key.algorithm(), "signed token");
        Ok(token)
    }
}

fn to_claims<C>(claims: &C) -> Result<Claims, MockError>
where
    C: Serialize + ?Sized,
{
    finite::check(claims).map_err(|e| MockError::Signing {
        reason: e.to_string(),
    })?;

    match serde_json::to_value(claims) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(MockError::Signing {
            reason: "claims must serialize to a JSON object".to_string(),
        }),
        Err(e) => Err(MockError::Signing {
            reason: e.to_string(),
        }),
    }
}

//! Claim decoding and standard timing-claim injection.
//!
//! Claims are an open JSON object supplied by the caller. The only claims
//! this crate ever writes are the registered timing claims (`iat`, `nbf`,
//! `exp`), and only when the [`ClaimsPolicy`] asks for them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::MockError;

/// Caller-supplied token claims.
pub type Claims = Map<String, Value>;

/// Which registered timing claims the token builder sets.
///
/// An enabled claim is always computed from the signing clock and replaces
/// any caller value. A disabled claim is left exactly as the caller sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimsPolicy {
    /// Set `iat` to the signing time.
    pub issued_at: bool,
    /// Set `exp` to the signing time plus this lifetime.
    pub expires_in: Option<Duration>,
    /// Set `nbf` to the signing time.
    pub not_before: bool,
}

impl Default for ClaimsPolicy {
    fn default() -> Self {
        Self {
            issued_at: true,
            expires_in: None,
            not_before: false,
        }
    }
}

impl ClaimsPolicy {
    /// A policy that never touches caller claims.
    pub fn passthrough() -> Self {
        Self {
            issued_at: false,
            expires_in: None,
            not_before: false,
        }
    }

    /// Write the enabled timing claims into `claims` using `now` as the clock.
    pub fn apply(&self, claims: &mut Claims, now: DateTime<Utc>) {
        let timestamp = now.timestamp();

        if self.issued_at {
            claims.insert("iat".to_string(), Value::from(timestamp));
        }
        if self.not_before {
            claims.insert("nbf".to_string(), Value::from(timestamp));
        }
        if let Some(lifetime) = self.expires_in {
            let lifetime = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);
            claims.insert(
                "exp".to_string(),
                Value::from(timestamp.saturating_add(lifetime)),
            );
        }
    }
}

/// Parse a raw request body into claims.
///
/// # Errors
///
/// Returns [`MockError::ClaimDecoding`] if the body is not valid JSON or is
/// valid JSON but not an object.
pub fn parse_claims(body: &[u8]) -> Result<Claims, MockError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(claims)) => Ok(claims),
        Ok(other) => Err(MockError::ClaimDecoding {
            reason: format!("expected a JSON object, got {}", json_type_name(&other)),
        }),
        Err(e) => Err(MockError::ClaimDecoding {
            reason: e.to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

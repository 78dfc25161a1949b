//! Local bearer token inspection
//!
//! Decodes the payload segment of a JWT-shaped token and checks its `exp`
//! claim against the wall clock. The signature is never verified: this only
//! avoids firing obviously stale requests and drives guard redirects. The
//! backend stays the authority on whether a token is accepted.

use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use serde_json::Value;

/// Claims read from a token payload
#[derive(Clone, Debug, PartialEq)]
pub struct TokenClaims {
    /// Expiration time (seconds since epoch)
    pub exp: i64,
    /// The full decoded payload
    pub payload: Value,
}

impl TokenClaims {
    /// Subject claim, when present
    pub fn subject(&self) -> Option<&str> {
        self.payload.get("sub").and_then(Value::as_str)
    }
}

/// Decode a token's payload without checking expiry.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(Error::malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let raw = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| Error::malformed(format!("payload is not base64url: {e}")))?;
    let payload: Value = serde_json::from_slice(&raw)
        .map_err(|e| Error::malformed(format!("payload is not JSON: {e}")))?;

    let exp = payload
        .get("exp")
        .and_then(numeric_seconds)
        .ok_or_else(|| Error::malformed("missing or non-numeric exp claim"))?;

    Ok(TokenClaims { exp, payload })
}

/// Decode a token and require it to be unexpired at `now` (epoch seconds).
pub fn inspect(token: &str, now: i64) -> Result<TokenClaims> {
    let claims = decode_claims(token)?;
    if claims.exp <= now {
        return Err(Error::ExpiredCredential {
            exp: claims.exp,
            now,
        });
    }
    Ok(claims)
}

/// Whether `token` must be treated as expired at `now` (epoch seconds).
///
/// Malformed tokens count as expired.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    inspect(token, now).is_err()
}

/// Whether `token` must be treated as expired right now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

fn numeric_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        _ => None,
    }
}

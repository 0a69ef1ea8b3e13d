//! Bearer token introspection.
//!
//! Tokens are decoded WITHOUT signature verification: the payload segment is
//! only read to learn when the token expires. The server remains the
//! authority on validity since every token is sent back to it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Claims read from a token payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    pub exp: Option<i64>,
    pub iat: Option<i64>,
    pub sub: Option<String>,
    pub email: Option<String>,
}

impl TokenClaims {
    /// Expiration as an absolute timestamp. A zero `exp` means unknown.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .filter(|exp| *exp != 0)
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat
            .filter(|iat| *iat != 0)
            .and_then(|iat| DateTime::from_timestamp(iat, 0))
    }
}

/// Decode the payload segment of a three-segment token.
/// Returns `None` for anything that is not `<header>.<base64url json>.<signature>`.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .ok()?;
    let value: Value = serde_json::from_slice(&payload).ok()?;
    let object = value.as_object()?;

    Some(TokenClaims {
        exp: object.get("exp").and_then(numeric_claim),
        iat: object.get("iat").and_then(numeric_claim),
        sub: object.get("sub").and_then(Value::as_str).map(str::to_string),
        email: object.get("email").and_then(Value::as_str).map(str::to_string),
    })
}

fn numeric_claim(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

/// Expiration of a token, or `None` when it cannot be determined
pub fn parse_expiration(token: &str) -> Option<DateTime<Utc>> {
    decode_claims(token).and_then(|claims| claims.expires_at())
}

/// Issue time of a token, if it carries one
pub fn parse_issued_at(token: &str) -> Option<DateTime<Utc>> {
    decode_claims(token).and_then(|claims| claims.issued_at())
}

/// True if `now + margin` is at or past the token's expiration, or if the
/// expiration is unknown.
pub fn is_expired(token: &str, margin: Duration) -> bool {
    is_expired_at(token, margin, Utc::now())
}

pub fn is_expired_at(token: &str, margin: Duration, now: DateTime<Utc>) -> bool {
    match parse_expiration(token) {
        Some(exp) => now + margin >= exp,
        None => true,
    }
}

/// Email-like identity embedded in the token, for status display
pub fn email_from_token(token: &str) -> Option<String> {
    let claims = decode_claims(token)?;
    [claims.email, claims.sub]
        .into_iter()
        .flatten()
        .find(|value| value.contains('@'))
}

#[cfg(test)]
pub(crate) fn make_token(payload: &str) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

//! Caller identity extraction from an untrusted bearer token.
//!
//! The token is decoded, not verified; the result is audit metadata only and
//! must never gate a request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

/// Attached to access records when no usable token accompanied the request.
pub const NO_TOKEN_SENTINEL: &str = "No JWT token sent with request.";

/// Decoded caller identity, or the explicit absence of one.
#[derive(Debug, Clone, PartialEq)]
pub enum CallerIdentity {
    /// Claims object decoded from the token payload.
    Token(Value),
    /// Header missing, malformed token, or undecodable payload.
    NotPresent,
}

impl CallerIdentity {
    /// Metadata value for the access record: the claims, or the sentinel.
    pub fn into_value(self) -> Value {
        match self {
            CallerIdentity::Token(claims) => claims,
            CallerIdentity::NotPresent => Value::String(NO_TOKEN_SENTINEL.to_string()),
        }
    }
}

/// Decode the `Authorization` header value into a caller identity.
///
/// Takes the bearer segment, splits the token on `.`, URL-safe-base64-decodes
/// the middle segment and parses it as JSON. Every failure mode collapses to
/// `NotPresent`.
pub fn decode_caller_identity(header: Option<&str>) -> CallerIdentity {
    match try_decode(header) {
        Some(claims) => CallerIdentity::Token(claims),
        None => CallerIdentity::NotPresent,
    }
}

fn try_decode(header: Option<&str>) -> Option<Value> {
    let token = header?.splitn(2, ' ').nth(1)?;
    let payload = token.split('.').nth(1)?;
    // Tolerate tokens that include padding despite the URL-safe alphabet.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

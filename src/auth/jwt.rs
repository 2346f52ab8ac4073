//! Client-side JWT inspection
//!
//! Only the payload is read; the signature is never checked. The result is a
//! hint for the UI, the backend stays the authority on token validity.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> Option<Vec<u8>> {
    use base64::{Engine as _, engine::general_purpose};

    general_purpose::URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .ok()
}

/// Decode the payload segment of a `header.payload.signature` token.
///
/// Returns `None` when the token does not have exactly three segments or the
/// payload is not a base64url-encoded JSON object.
pub fn decode_claims(token: &str) -> Option<serde_json::Map<String, Value>> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let bytes = base64_decode_url(parts[1])?;
    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// Expiry claim of a token.
///
/// `Some(None)` means the payload decoded but carries no `exp`; `None` means
/// the token could not be read.
pub fn expiry(token: &str) -> Option<Option<DateTime<Utc>>> {
    let claims = decode_claims(token)?;
    match claims.get("exp") {
        None | Some(Value::Null) => Some(None),
        Some(Value::Number(n)) => {
            let secs = n.as_f64()?;
            Some(DateTime::from_timestamp(secs.floor() as i64, 0))
        }
        Some(_) => None,
    }
}

/// Advisory validity check evaluated at `now`.
///
/// Fails closed on anything malformed. A token without `exp` is valid; one
/// with `exp` is valid iff `exp > now` in whole seconds.
pub fn is_valid_at(token: &str, now: DateTime<Utc>) -> bool {
    let Some(claims) = decode_claims(token) else {
        return false;
    };

    match claims.get("exp") {
        None | Some(Value::Null) => true,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(exp) => exp > now.timestamp() as f64,
            None => false,
        },
        Some(_) => false,
    }
}

/// Advisory validity check at the moment of the call
pub fn is_valid(token: &str) -> bool {
    is_valid_at(token, Utc::now())
}

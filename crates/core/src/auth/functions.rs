use chrono::{DateTime, Duration, Utc};

use super::Claims;

/// Check if a token's claims have expired.
pub fn is_token_expired(claims: &Claims, now: DateTime<Utc>) -> bool {
    claims.exp <= now.timestamp()
}

/// Calculate token expiry from issue time and TTL.
pub fn calculate_expiry(issued_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    issued_at + ttl
}

/// Extract username from email if no name provided.
pub fn email_to_name(email: &str) -> String {
    match email.split('@').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "User".to_string(),
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for other schemes
/// or an empty token.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

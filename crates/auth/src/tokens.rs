//! HS256 JWT access tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;
use wishlist_core::auth::{calculate_expiry, AuthError, Claims, Result, TokenCodec};

/// Issues and verifies HS256-signed JWTs whose subject is the user's email.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtCodec {
    pub fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::minutes(30)),
        }
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: calculate_expiry(now, self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{AuthError, Claims};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// One-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    async fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Signs and verifies bearer tokens.
pub trait TokenCodec: Send + Sync {
    /// Issue a token for `subject` valid from `now` for the configured TTL.
    fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String>;

    /// Verify a token's signature and expiry, returning its claims.
    fn verify(&self, token: &str) -> Result<Claims>;
}

use std::time::Duration;

/// Secret used when `JWT_SECRET` is unset. Only suitable for local development.
pub const DEV_JWT_SECRET: &str = "wishlist-dev-secret-change-me";

/// Complete auth configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(30 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC secret for signing tokens (default: a development secret)
    /// - `TOKEN_TTL_MINUTES`: Access token lifetime in minutes (default: 30)
    /// - `BCRYPT_COST`: bcrypt work factor, 4 to 31 (default: 12)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                defaults.jwt_secret
            }
        };

        let token_ttl = std::env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|minutes| Duration::from_secs(minutes * 60))
            .unwrap_or(defaults.token_ttl);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(defaults.bcrypt_cost);

        Self {
            jwt_secret,
            token_ttl,
            bcrypt_cost,
        }
    }

    /// Cheap settings for tests.
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(30 * 60),
            bcrypt_cost: 4,
        }
    }
}

//! Application state for auth.

use std::sync::Arc;

use chrono::Utc;
use wishlist_core::auth::{
    validate_email, validate_password, AccessToken, AuthError as CoreError, PasswordHasher,
    TokenCodec,
};
use wishlist_core::storage::{RepositoryError, UserRepository};
use wishlist_core::wishlist::User;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::hasher::BcryptHasher;
use crate::tokens::JwtCodec;

/// Shared state for auth handlers and extractors.
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenCodec>,
    pub config: AuthConfig,
}

impl AuthState {
    /// Creates an AuthState with bcrypt hashing and JWT tokens built from `config`.
    pub fn new(users: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost));
        let tokens = Arc::new(JwtCodec::new(config.jwt_secret.as_bytes(), config.token_ttl));

        Self {
            users,
            hasher,
            tokens,
            config,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken` if the email is already registered, and a
    /// validation error for a malformed email or empty password.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<User, AuthError> {
        let email = validate_email(email)?;
        validate_password(password)?;

        if self.users.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let hash = self.hasher.hash(password).await?;
        let mut user = User::new(email, hash);
        user.full_name = full_name.filter(|name| !name.trim().is_empty());

        match self.users.create_user(&user).await {
            Ok(()) => {}
            // Lost a race with a concurrent registration.
            Err(RepositoryError::AlreadyExists { .. }) => return Err(AuthError::EmailTaken),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Checks an email/password pair, returning the matching user.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let Ok(email) = validate_email(email) else {
            return Err(CoreError::InvalidCredentials.into());
        };

        let user = self
            .users
            .get_user_by_email(&email)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            return Err(CoreError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Issues a bearer token for `user`.
    pub fn issue_token(&self, user: &User) -> Result<AccessToken, AuthError> {
        let token = self.tokens.issue(&user.email, Utc::now())?;
        Ok(AccessToken::bearer(token))
    }

    /// Resolves a bearer token to the user it was issued for.
    pub async fn user_for_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.verify(token)?;

        let user = self
            .users
            .get_user_by_email(&claims.sub)
            .await?
            .ok_or(CoreError::UserNotFound)?;

        Ok(user)
    }
}

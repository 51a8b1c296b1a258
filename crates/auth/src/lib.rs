//! Password and bearer-token authentication for the wishlist service.
//!
//! This crate provides:
//! - bcrypt password hashing and HS256 JWT access tokens
//! - Registration, token, and profile routes
//! - An Axum extractor for the authenticated user

mod config;
mod error;
mod extractors;
mod handlers;
mod hasher;
mod state;
mod tokens;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::CurrentUser;
pub use handlers::{auth_routes, RegisterRequest};
pub use hasher::BcryptHasher;
pub use state::AuthState;
pub use tokens::JwtCodec;

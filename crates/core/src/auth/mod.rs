mod error;
mod functions;
mod traits;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{calculate_expiry, email_to_name, is_token_expired, parse_bearer};
pub use traits::{PasswordHasher, Result, TokenCodec};
pub use types::{AccessToken, Claims, TOKEN_TYPE};
pub use validation::{validate_email, validate_password, ValidationError};

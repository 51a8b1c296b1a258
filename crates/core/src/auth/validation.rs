use thiserror::Error;

/// Input rejected before it reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value is not a valid email address")]
    InvalidEmail,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Validates and normalizes an email address.
///
/// Accepts `local@domain.tld` with no whitespace, a single `@`, and a dotted
/// domain. The domain part is lowercased.
///
/// # Examples
///
/// ```
/// use wishlist_core::auth::validate_email;
///
/// assert_eq!(validate_email(" Alice@Example.COM ").unwrap(), "Alice@example.com");
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    let valid_domain = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    if !valid_domain {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(format!("{}@{}", local, domain.to_ascii_lowercase()))
}

/// Rejects empty passwords.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::EmptyPassword)
    } else {
        Ok(())
    }
}

//! Input validation for modboard user registration.
//!
//! This module provides validation functions for usernames, passwords,
//! and email addresses.

use thiserror::Error;

use super::password::MAX_PASSWORD_LENGTH;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty.
    #[error("username is required")]
    UsernameEmpty,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains control characters.
    #[error("username must not contain control characters")]
    UsernameControlChars,

    /// Password is empty.
    #[error("password is required")]
    PasswordEmpty,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,
}

/// Validate a username.
///
/// Requirements:
/// - Length: 1-32 characters after trimming
/// - No control characters; any other script or punctuation is allowed
///
/// # Examples
///
/// ```
/// use modboard::auth::validation::validate_username;
///
/// assert!(validate_username("john_doe").is_ok());
/// assert!(validate_username("홍길동").is_ok());
/// assert!(validate_username("").is_err());
/// assert!(validate_username("john\u{0}doe").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if username.chars().any(char::is_control) {
        return Err(ValidationError::UsernameControlChars);
    }
    Ok(())
}

/// Validate a registration password: present and at most 128 characters.
pub fn validate_registration_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Validate an email address (optional field).
///
/// An empty string is accepted. Otherwise the address needs exactly one
/// `@` with text on both sides and no whitespace.
///
/// # Examples
///
/// ```
/// use modboard::auth::validation::validate_email;
///
/// assert!(validate_email("").is_ok());
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Ok(());
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::EmailInvalidFormat),
    }
}

/// Validate all registration fields at once.
///
/// Returns the first validation error encountered.
pub fn validate_registration(
    username: &str,
    password: &str,
    email: Option<&str>,
) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_registration_password(password)?;
    if let Some(e) = email {
        validate_email(e)?;
    }
    Ok(())
}

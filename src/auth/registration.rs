//! User registration for modboard.
//!
//! This module provides the user registration functionality.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_registration, ValidationError};
use crate::auth::{hash_password, PasswordError};
use crate::db::{Database, NewUser, ProfileFields, Role, User, UserRepository};

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Username already exists.
    #[error("username already exists")]
    UsernameExists,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (1-32 characters, letters, digits, `_`, `-`).
    pub username: String,
    /// Password (1-128 characters).
    pub password: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional gender and region fields.
    pub profile: ProfileFields,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
            profile: ProfileFields::default(),
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the profile fields.
    pub fn with_profile(mut self, profile: ProfileFields) -> Self {
        self.profile = profile;
        self
    }
}

/// Register a new member.
///
/// This function:
/// 1. Validates all input fields
/// 2. Checks if the username already exists
/// 3. Hashes the password
/// 4. Creates the user in the database
///
/// # Examples
///
/// ```ignore
/// use modboard::auth::{register, RegistrationRequest};
/// use modboard::Database;
///
/// let db = Database::open_in_memory().await?;
/// let request = RegistrationRequest::new("john_doe", "password123")
///     .with_email("john@example.com");
///
/// let user = register(&db, request).await?;
/// println!("Registered user: {}", user.username);
/// ```
pub async fn register(
    db: &Database,
    request: RegistrationRequest,
) -> std::result::Result<User, RegistrationError> {
    register_with_role(db, request, Role::Member).await
}

/// Register a new user with a specific role.
///
/// Used for seeding the initial admin account.
pub async fn register_with_role(
    db: &Database,
    request: RegistrationRequest,
    role: Role,
) -> std::result::Result<User, RegistrationError> {
    let username = request.username.trim();
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    validate_registration(username, &request.password, email)?;

    let repo = UserRepository::new(db.pool());
    if repo
        .username_exists(username)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
    {
        return Err(RegistrationError::UsernameExists);
    }

    let password_hash = hash_password(&request.password)?;

    let mut new_user = NewUser::new(username, password_hash)
        .with_role(role)
        .with_profile(request.profile.normalized());
    if let Some(email) = email {
        new_user = new_user.with_email(email);
    }

    let user = repo
        .create(&new_user)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?;

    info!(
        username = %user.username,
        user_id = user.id,
        role = %user.role,
        "New user registered"
    );

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_register_success() {
        let db = setup_db().await;

        let request = RegistrationRequest::new("john_doe", "password123")
            .with_email("john@example.com")
            .with_profile(ProfileFields {
                gender: Some("F".to_string()),
                region_level1: Some("Seoul".to_string()),
                region_level2: Some(" ".to_string()),
                ..Default::default()
            });

        let user = register(&db, request).await.unwrap();
        assert_eq!(user.username, "john_doe");
        assert_eq!(user.email.as_deref(), Some("john@example.com"));
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.profile.gender.as_deref(), Some("F"));
        assert_eq!(user.profile.region_level1.as_deref(), Some("Seoul"));
        assert!(user.profile.region_level2.is_none());
        assert!(user.password.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_trims_username_and_drops_blank_email() {
        let db = setup_db().await;

        let request = RegistrationRequest::new("  jane  ", "password123").with_email("  ");
        let user = register(&db, request).await.unwrap();
        assert_eq!(user.username, "jane");
        assert!(user.email.is_none());
    }

    #[tokio::test]
    async fn test_register_hangul_username_and_short_password() {
        let db = setup_db().await;

        let user = register(&db, RegistrationRequest::new("홍길동", "test123"))
            .await
            .unwrap();
        assert_eq!(user.username, "홍길동");

        let user = register(&db, RegistrationRequest::new("john.doe", "pw"))
            .await
            .unwrap();
        assert_eq!(user.username, "john.doe");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let db = setup_db().await;

        register(&db, RegistrationRequest::new("john_doe", "password123"))
            .await
            .unwrap();

        let result = register(&db, RegistrationRequest::new("john_doe", "password456")).await;
        assert!(matches!(result, Err(RegistrationError::UsernameExists)));

        let result = register(&db, RegistrationRequest::new(" john_doe ", "password456")).await;
        assert!(matches!(result, Err(RegistrationError::UsernameExists)));

        assert!(register(&db, RegistrationRequest::new("John_Doe", "password456"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_register_invalid_input() {
        let db = setup_db().await;

        let result = register(&db, RegistrationRequest::new("bad\tname", "password123")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(ValidationError::UsernameControlChars))
        ));

        let result = register(&db, RegistrationRequest::new("john", "")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(ValidationError::PasswordEmpty))
        ));

        let result = register(
            &db,
            RegistrationRequest::new("john", "password123").with_email("nope"),
        )
        .await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(ValidationError::EmailInvalidFormat))
        ));
    }

    #[tokio::test]
    async fn test_register_with_role() {
        let db = setup_db().await;

        let user = register_with_role(
            &db,
            RegistrationRequest::new("admin", "admin_password"),
            Role::Admin,
        )
        .await
        .unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_registration_error_display() {
        let err = RegistrationError::Validation(ValidationError::PasswordEmpty);
        assert_eq!(err.to_string(), "password is required");
        assert_eq!(
            RegistrationError::UsernameExists.to_string(),
            "username already exists"
        );
    }
}

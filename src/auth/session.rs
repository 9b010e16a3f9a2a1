//! Login credential checks for modboard.
//!
//! Sessions themselves are stateless signed tokens (see
//! `web::middleware::auth`); this module only decides whether a
//! username/password pair identifies a user.

use thiserror::Error;
use tracing::{debug, info};

use crate::auth::verify_password;
use crate::db::{Database, User, UserRepository};

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Unknown username or wrong password. The two are not distinguished.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Check a username/password pair.
///
/// Usernames match exactly, after trimming. Returns the user on success.
pub async fn authenticate(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<User, SessionError> {
    let user = UserRepository::new(db.pool())
        .get_by_username(username.trim())
        .await
        .map_err(|e| SessionError::Database(e.to_string()))?;

    let Some(user) = user else {
        debug!(username, "login failed: unknown user");
        return Err(SessionError::InvalidCredentials);
    };

    if verify_password(password, &user.password).is_err() {
        debug!(username, "login failed: wrong password");
        return Err(SessionError::InvalidCredentials);
    }

    info!(user_id = user.id, username = %user.username, "User logged in");
    Ok(user)
}

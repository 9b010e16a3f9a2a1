//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{self, RegistrationError, RegistrationRequest, SessionError};
use crate::web::dto::{LoginRequest, MessageResponse, RegisterRequest, UserEnvelope, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::auth::removal_cookie;
use crate::web::middleware::OptionalAuthUser;

/// POST /api/auth/register - Register a new member.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError> {
    let mut request = RegistrationRequest::new(req.username, req.password).with_profile(req.profile);
    if let Some(email) = req.email {
        request = request.with_email(email);
    }

    let user = auth::register(&state.db, request)
        .await
        .map_err(|e| match e {
            RegistrationError::Validation(e) => ApiError::bad_request(e.to_string()),
            RegistrationError::UsernameExists => ApiError::bad_request("Username already exists"),
            other => {
                tracing::error!("Registration failed: {}", other);
                ApiError::internal("Registration failed")
            }
        })?;

    Ok((StatusCode::CREATED, Json(UserEnvelope::new(user))))
}

/// POST /api/auth/login - Verify credentials and set the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<UserEnvelope>), ApiError> {
    let user = auth::authenticate(&state.db, &req.username, &req.password)
        .await
        .map_err(|e| match e {
            SessionError::InvalidCredentials => {
                ApiError::unauthorized("Invalid username or password")
            }
            SessionError::Database(msg) => {
                tracing::error!("Login failed: {}", msg);
                ApiError::internal("Login failed")
            }
        })?;

    let token = state.keys.issue(&user).map_err(|e| {
        tracing::error!("Failed to encode JWT: {}", e);
        ApiError::internal("Failed to generate token")
    })?;

    let jar = jar.add(state.keys.session_cookie(token, state.secure_cookies));
    Ok((jar, Json(UserEnvelope::new(user))))
}

/// POST /api/auth/logout - Clear the session cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.remove(removal_cookie()),
        Json(MessageResponse::new("Logged out")),
    )
}

/// GET /api/auth/me - Current user, or `null` when not logged in.
///
/// Never fails: an error while reloading the user also yields `null`.
pub async fn me(auth: Result<OptionalAuthUser, ApiError>) -> Json<UserEnvelope> {
    match auth {
        Ok(OptionalAuthUser(Some(user))) => Json(UserEnvelope::new(user)),
        Ok(OptionalAuthUser(None)) => Json(UserEnvelope::anonymous()),
        Err(e) => {
            tracing::debug!("Answering anonymous after error: {}", e);
            Json(UserEnvelope::anonymous())
        }
    }
}

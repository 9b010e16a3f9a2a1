//! JWT cookie authentication.
//!
//! Tokens travel in the `token` cookie. Every request decodes and verifies
//! the token before trusting any claim, then reloads the user so the role
//! in effect is the one currently stored, not the one in the token.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::board::Viewer;
use crate::db::{Database, User, UserRepository};
use crate::web::error::ApiError;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Username.
    pub username: String,
    /// Role level at issue time. Informational only.
    pub role: i64,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// JWT ID (unique identifier).
    pub jti: String,
}

/// Signing and verification keys for session tokens (HS256).
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_secs: i64,
}

impl TokenKeys {
    /// Create keys from a shared secret and a token lifetime in days.
    pub fn new(secret: &str, expiry_days: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_secs: (expiry_days as i64).saturating_mul(SECONDS_PER_DAY),
        }
    }

    /// Token lifetime in seconds. Also used as the cookie Max-Age.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issue a token for `user`, valid from now.
    pub fn issue(&self, user: &User) -> jsonwebtoken::errors::Result<String> {
        self.issue_at(user, chrono::Utc::now().timestamp())
    }

    /// Issue a token for `user` as if it were issued at `issued_at`.
    pub fn issue_at(&self, user: &User, issued_at: i64) -> jsonwebtoken::errors::Result<String> {
        let claims = JwtClaims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role.level(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.lifetime_secs),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify signature, algorithm and expiry, and return the claims.
    pub fn verify(&self, token: &str) -> jsonwebtoken::errors::Result<JwtClaims> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }

    /// Build the session cookie carrying `token`.
    pub fn session_cookie(&self, token: String, secure: bool) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(time::Duration::seconds(self.lifetime_secs))
            .build()
    }
}

/// Cookie used to clear the session on logout.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, "")).path("/").build()
}

/// Outcome of reading the session cookie.
#[derive(Debug)]
pub enum TokenState {
    /// No `token` cookie.
    Missing,
    /// A token was present but failed verification.
    Invalid,
    /// A verified token.
    Valid(JwtClaims),
}

impl TokenState {
    /// Read and verify the session cookie from request parts.
    pub fn from_parts(parts: &Parts) -> Result<Self, ApiError> {
        let keys = parts
            .extensions
            .get::<Arc<TokenKeys>>()
            .ok_or_else(|| ApiError::internal("Token keys not configured"))?;

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(TOKEN_COOKIE) else {
            return Ok(TokenState::Missing);
        };
        if cookie.value().is_empty() {
            return Ok(TokenState::Missing);
        }

        match keys.verify(cookie.value()) {
            Ok(claims) => Ok(TokenState::Valid(claims)),
            Err(e) => {
                tracing::debug!("JWT validation failed: {}", e);
                Ok(TokenState::Invalid)
            }
        }
    }
}

async fn load_user(db: &Database, claims: &JwtClaims) -> Result<Option<User>, ApiError> {
    Ok(UserRepository::new(db.pool()).get_by_id(claims.sub).await?)
}

/// Extractor for authenticated users.
///
/// Rejects with 401 when the cookie is missing, when the token fails
/// verification, or when the user no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// The user as a post viewer.
    pub fn viewer(&self) -> Viewer {
        Viewer::from(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Database: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = match TokenState::from_parts(parts)? {
            TokenState::Missing => return Err(ApiError::unauthorized("Login required")),
            TokenState::Invalid => return Err(ApiError::unauthorized("Invalid or expired token")),
            TokenState::Valid(claims) => claims,
        };

        let db = Database::from_ref(state);
        match load_user(&db, &claims).await? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                tracing::debug!(user_id = claims.sub, "token for unknown user");
                Err(ApiError::unauthorized("User not found"))
            }
        }
    }
}

/// Optional authentication extractor.
///
/// Similar to AuthUser but degrades to anonymous instead of failing.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<User>);

impl OptionalAuthUser {
    /// The user as a post viewer, anonymous if not logged in.
    pub fn viewer(&self) -> Viewer {
        self.0.as_ref().map(Viewer::from).unwrap_or_default()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    Database: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = match TokenState::from_parts(parts)? {
            TokenState::Missing | TokenState::Invalid => return Ok(OptionalAuthUser(None)),
            TokenState::Valid(claims) => claims,
        };

        let db = Database::from_ref(state);
        Ok(OptionalAuthUser(load_user(&db, &claims).await?))
    }
}

/// Middleware function to inject the token keys into request extensions.
pub async fn jwt_auth(keys: Arc<TokenKeys>, mut request: Request<Body>, next: Next) -> Response {
    request.extensions_mut().insert(keys);
    next.run(request).await
}

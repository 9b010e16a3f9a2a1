//! API handlers for the modboard web API.

pub mod auth;
pub mod board;
pub mod post;

pub use auth::*;
pub use board::*;
pub use post::*;

use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::web::middleware::TokenKeys;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool handle.
    pub db: Database,
    /// Session token keys.
    pub keys: Arc<TokenKeys>,
    /// Whether the session cookie carries the Secure flag.
    pub secure_cookies: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, keys: Arc<TokenKeys>, secure_cookies: bool) -> Self {
        Self {
            db,
            keys,
            secure_cookies,
        }
    }

    /// Create the application state from configuration.
    pub fn from_config(db: Database, config: &Config) -> Self {
        let keys = TokenKeys::new(&config.auth.jwt_secret, config.auth.token_expiry_days);
        Self::new(db, Arc::new(keys), config.auth.secure_cookies)
    }
}

impl FromRef<Arc<AppState>> for Database {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

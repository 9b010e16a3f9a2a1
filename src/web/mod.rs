//! Web API module for modboard.
//!
//! This module provides the HTTP/JSON interface: cookie-based
//! authentication, board listing, and post moderation endpoints.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;

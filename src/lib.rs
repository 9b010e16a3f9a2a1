//! modboard - Moderated community bulletin board
//!
//! Users register, log in, and post to boards. Posts stay pending until a
//! reviewer approves them. The interface is a JSON web API with a signed
//! session token in an HTTP-only cookie.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod seed;
pub mod web;

pub use auth::{
    authenticate, hash_password, register, register_with_role, validate_password,
    verify_password, PasswordError, RegistrationError, RegistrationRequest, SessionError,
    ValidationError,
};
pub use board::{
    Board, BoardRepository, BoardService, NewBoard, NewPost, Post, PostRepository, PostStatus,
    Viewer,
};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository};
pub use error::{ModboardError, Result};
pub use web::WebServer;

//! Authentication module for modboard.
//!
//! This module provides password hashing, credential checks,
//! user registration, and input validation.

mod password;
mod registration;
mod session;
pub mod validation;

pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use registration::{register, register_with_role, RegistrationError, RegistrationRequest};
pub use session::{authenticate, SessionError};
pub use validation::ValidationError;

//! Error types for token and password handling

use std::time::SystemTimeError;
use thiserror::Error;

/// Errors raised by the authentication primitives
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token is malformed, badly signed or expired
    #[error("Could not validate credentials: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// The token decoded but carries no identifying claim
    #[error("Token is missing the subject claim")]
    MissingClaim,

    /// Signing a new token failed
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Hashing or parsing a stored password hash failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Invalid JWT configuration
    #[error("JWT configuration error: {0}")]
    Configuration(String),

    /// System clock is before the UNIX epoch
    #[error("Failed to get current time: {0}")]
    Clock(#[from] SystemTimeError),
}

impl AuthError {
    /// Whether the error was caused by what the caller presented
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthError::InvalidToken(_) | AuthError::MissingClaim)
    }
}

/// Type alias for Result with AuthError
pub type AuthResult<T> = Result<T, AuthError>;

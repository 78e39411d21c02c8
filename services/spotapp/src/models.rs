//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod comment;
pub mod spot;
pub mod user;

/// Confirmation body for operations that return no entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login form, shaped like an OAuth2 password grant
#[derive(Deserialize)]
pub struct LoginForm {
    /// Nickname or email
    pub username: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

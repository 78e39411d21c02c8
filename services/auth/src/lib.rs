//! Authentication primitives for the Spotapp services
//!
//! Token issuance and verification, password hashing and account field
//! validation. Nothing here talks to the store or to HTTP.

pub mod error;
pub mod jwt;
pub mod password;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use jwt::{Algorithm, Claims, JwtConfig, JwtService};

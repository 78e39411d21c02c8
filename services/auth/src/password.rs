//! Password hashing with Argon2

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::OnceLock;

use crate::error::{AuthError, AuthResult};

/// Hash a plain-text password into a PHC string
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plain-text password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::PasswordHash(format!("Failed to parse password hash: {}", e)))?;

    let argon2 = Argon2::default();
    let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

    Ok(result.is_ok())
}

/// Run a verification against a throwaway hash
///
/// Used when no account matched, so a failed lookup costs as much as a
/// wrong password. Always reports a mismatch.
pub fn verify_dummy_password(password: &str) -> AuthResult<bool> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    let hash = match DUMMY_HASH.get() {
        Some(hash) => hash,
        None => {
            let hash = hash_password("spotapp-dummy-password")?;
            DUMMY_HASH.get_or_init(|| hash)
        }
    };

    verify_password(password, hash)?;
    Ok(false)
}

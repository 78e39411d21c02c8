//! Input validation utilities for account fields

use regex::Regex;
use std::sync::OnceLock;

/// Longest nickname the `users.nickname` column holds
pub const NICKNAME_MAX_LEN: usize = 30;

/// Longest first or last name the `users` columns hold
pub const NAME_MAX_LEN: usize = 30;

/// Validate a nickname
///
/// Nicknames are public handles and double as login names next to the
/// email, so they are restricted to ASCII letters, digits and underscores
/// and can never be mistaken for an address.
pub fn validate_nickname(nickname: &str) -> Result<(), String> {
    static NICKNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NICKNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile nickname regex"));

    match nickname.len() {
        0 => Err("Nickname is required".to_string()),
        1..=2 => Err("Nickname must be at least 3 characters long".to_string()),
        len if len > NICKNAME_MAX_LEN => Err(format!(
            "Nickname must be at most {} characters long",
            NICKNAME_MAX_LEN
        )),
        _ if !regex.is_match(nickname) => {
            Err("Nickname can only contain letters, numbers, and underscores".to_string())
        }
        _ => Ok(()),
    }
}

/// Validate an email, the identity carried in login tokens
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a plain-text password before it is hashed
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a first or last name; `field` names it in the error
///
/// Any script is allowed, so the limit counts characters, not bytes.
pub fn validate_name(field: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{} is required", field));
    }

    if name.chars().count() > NAME_MAX_LEN {
        return Err(format!(
            "{} must be at most {} characters long",
            field, NAME_MAX_LEN
        ));
    }

    Ok(())
}

//! User models

use auth::validation::{validate_email, validate_name, validate_nickname, validate_password};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::extract::Validate;

/// User row as stored
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i32,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub user_pic: Option<String>,
    pub email: String,
    pub hashed_password: String,
    pub premium_account_type: bool,
    pub disabled: bool,
    pub friends: Vec<String>,
    pub added_spots: Vec<String>,
    pub favourite_spots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i32,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub user_pic: Option<String>,
    pub email: String,
    pub premium_account_type: bool,
    pub friends: Vec<String>,
    pub added_spots: Vec<String>,
    pub favourite_spots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            nickname: user.nickname,
            first_name: user.first_name,
            last_name: user.last_name,
            user_pic: user.user_pic,
            email: user.email,
            premium_account_type: user.premium_account_type,
            friends: user.friends,
            added_spots: user.added_spots,
            favourite_spots: user.favourite_spots,
            created_at: user.created_at,
        }
    }
}

/// Response for signup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserCreated {
    pub nickname: String,
    pub email: String,
}

/// Signup payload
#[derive(Deserialize)]
pub struct NewUser {
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub user_pic: Option<String>,
    #[serde(default)]
    pub premium_account_type: bool,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub added_spots: Vec<String>,
    #[serde(default)]
    pub favourite_spots: Vec<String>,
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), String> {
        validate_nickname(&self.nickname)?;
        validate_name("First name", &self.first_name)?;
        validate_name("Last name", &self.last_name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Partial update payload
///
/// An absent field is left unchanged. A present field is written as given,
/// including empty strings and `false`. The `disabled` flag is not part of
/// it; accounts cannot re-enable themselves through this endpoint.
#[derive(Deserialize, Default)]
pub struct UpdateUser {
    pub nickname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_pic: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub premium_account_type: Option<bool>,
    pub friends: Option<Vec<String>>,
    pub added_spots: Option<Vec<String>>,
    pub favourite_spots: Option<Vec<String>>,
}

impl UpdateUser {
    /// True when the payload carries no field at all
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.user_pic.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.premium_account_type.is_none()
            && self.friends.is_none()
            && self.added_spots.is_none()
            && self.favourite_spots.is_none()
    }
}

impl Validate for UpdateUser {
    fn validate(&self) -> Result<(), String> {
        if let Some(nickname) = &self.nickname {
            validate_nickname(nickname)?;
        }
        if let Some(first_name) = &self.first_name {
            validate_name("First name", first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            validate_name("Last name", last_name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        serde_json::from_value(serde_json::json!({
            "nickname": "rickstar",
            "first_name": "rick",
            "last_name": "morty",
            "email": "rickstar@fake.com",
            "password": "strong_password"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_user_defaults() {
        let user = new_user();
        assert!(!user.premium_account_type);
        assert!(user.friends.is_empty());
        assert!(user.user_pic.is_none());
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_new_user_rejects_bad_email() {
        let mut user = new_user();
        user.email = "not-an-email".to_string();
        assert_eq!(user.validate().unwrap_err(), "Invalid email format");
    }

    #[test]
    fn test_update_presence_is_not_truthiness() {
        let update: UpdateUser = serde_json::from_value(serde_json::json!({
            "premium_account_type": false,
            "user_pic": ""
        }))
        .unwrap();

        assert!(!update.is_empty());
        assert_eq!(update.premium_account_type, Some(false));
        assert_eq!(update.user_pic.as_deref(), Some(""));
    }

    #[test]
    fn test_update_ignores_disabled_flag() {
        let update: UpdateUser =
            serde_json::from_value(serde_json::json!({ "disabled": false })).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_empty_update() {
        let update: UpdateUser = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        let update = UpdateUser {
            nickname: Some("x".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}

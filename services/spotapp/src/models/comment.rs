//! Comment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::extract::{Validate, check_id};

/// Comment row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub owner_id: i32,
    pub spot_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Comment creation payload; the owner is the authenticated caller
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub body: String,
    pub spot_id: Option<i32>,
}

impl Validate for NewComment {
    fn validate(&self) -> Result<(), String> {
        if self.body.trim().is_empty() {
            return Err("Comment body must not be empty".to_string());
        }
        if let Some(spot_id) = self.spot_id {
            check_id("spot_id", spot_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_validation() {
        let comment = NewComment {
            body: "This is awesome spot!".to_string(),
            spot_id: Some(1),
        };
        assert!(comment.validate().is_ok());

        let blank = NewComment {
            body: "   ".to_string(),
            spot_id: None,
        };
        assert!(blank.validate().is_err());

        let bad_spot = NewComment {
            spot_id: Some(0),
            ..comment
        };
        assert!(bad_spot.validate().is_err());
    }
}

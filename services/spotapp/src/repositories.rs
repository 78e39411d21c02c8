//! Data-access functions for users, spots and comments
//!
//! Every function takes the caller's connection (normally the request's
//! transaction) instead of owning a pool, so all store operations of one
//! request share a single unit of work.

use thiserror::Error;

pub mod comment;
pub mod spot;
pub mod user;

/// Domain-level outcome of a failed store operation
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No row matched the identifier
    #[error("{entity} with id={id} was not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A unique constraint rejected the write
    #[error("{0}")]
    AlreadyExists(String),

    /// A foreign key pointed at a missing row
    #[error("{0}")]
    InvalidReference(String),

    /// Any other store failure
    #[error("Database query error: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepositoryError::AlreadyExists(unique_violation_message(
                    db_err.constraint(),
                ));
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::InvalidReference(foreign_key_violation_message(
                    db_err.constraint(),
                ));
            }
        }
        RepositoryError::Query(err)
    }
}

/// Type alias for repository results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn unique_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("users_nickname_key") => "User with this nickname already exists".to_string(),
        Some("users_email_key") => "User with this email already exists".to_string(),
        _ => "Record already exists".to_string(),
    }
}

fn foreign_key_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some(c) if c.contains("owner_id") => "Referenced owner does not exist".to_string(),
        Some(c) if c.contains("spot_id") => "Referenced spot does not exist".to_string(),
        _ => "Referenced record does not exist".to_string(),
    }
}

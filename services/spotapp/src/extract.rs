//! Request extractors that validate input before a handler touches the store
//!
//! Anything malformed here is rejected with 406 rather than axum's default
//! 400/422 rejections.

use axum::{
    Json,
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Field-level checks run on a payload after it deserializes
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Parse an identifier: a positive integer that fits in 32 signed bits
pub fn parse_id(field: &str, raw: &str) -> Result<i32, String> {
    let id = raw
        .parse::<i32>()
        .map_err(|_| format!("{} must be a positive 32-bit integer, got '{}'", field, raw))?;
    check_id(field, id)?;
    Ok(id)
}

/// Reject non-positive identifiers
pub fn check_id(field: &str, id: i32) -> Result<(), String> {
    if id < 1 {
        return Err(format!(
            "{} must be a positive 32-bit integer, got '{}'",
            field, id
        ));
    }
    Ok(())
}

/// Identifier taken from the single path parameter of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        parse_id("id", &raw)
            .map(EntityId)
            .map_err(ApiError::Validation)
    }
}

/// JSON body that deserialized and passed [`Validate`]
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        value.validate().map_err(ApiError::Validation)?;
        Ok(ValidJson(value))
    }
}

/// Query string that deserialized; malformed input maps to 406
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        Ok(ValidQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_positive_i32() {
        assert_eq!(parse_id("id", "1"), Ok(1));
        assert_eq!(parse_id("id", "2147483647"), Ok(i32::MAX));
    }

    #[test]
    fn test_parse_id_rejects_out_of_range() {
        for raw in ["0", "-1", "2147483648", "99999999999", "abc", "1.5", ""] {
            assert!(parse_id("id", raw).is_err(), "accepted {raw:?}");
        }
    }
}

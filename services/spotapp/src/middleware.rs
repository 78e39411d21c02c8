//! Bearer token authentication
//!
//! `auth_middleware` only verifies the token. Routes that mutate data also
//! call [`require_active`] inside their transaction, which reloads the
//! account and rejects disabled ones.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use sqlx::PgConnection;
use tracing::{debug, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::user::User,
    repositories::user,
    state::AppState,
};

/// Identity recovered from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
}

/// Verify the bearer token and expose the caller as an [`AuthUser`] extension
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        debug!("Request without bearer token");
        ApiError::Unauthorized
    })?;

    let claims = state.jwt_service.validate_token(bearer.token())?;

    req.extensions_mut().insert(AuthUser { email: claims.sub });

    Ok(next.run(req).await)
}

/// Load the caller's account and reject it when disabled
pub async fn require_active(conn: &mut PgConnection, caller: &AuthUser) -> ApiResult<User> {
    let account = user::find_by_email(conn, &caller.email)
        .await?
        .ok_or_else(|| {
            warn!("Token subject {} has no account", caller.email);
            ApiError::Unauthorized
        })?;

    if account.disabled {
        return Err(ApiError::Forbidden("Inactive user".to_string()));
    }

    Ok(account)
}

//! Login endpoint

use auth::password::{verify_dummy_password, verify_password};
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{LoginForm, TokenResponse},
    repositories::user,
    state::AppState,
};

/// Exchange nickname/email and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Form(form) = form.map_err(|e| ApiError::Validation(e.body_text()))?;
    info!("Login attempt for user: {}", form.username);

    let mut tx = state.db_pool.begin().await?;
    let account = user::find_by_nickname_or_email(&mut tx, &form.username).await?;
    tx.commit().await?;

    let Some(account) = account else {
        verify_dummy_password(&form.password)?;
        return Err(ApiError::InvalidCredentials);
    };
    if !verify_password(&form.password, &account.hashed_password)? {
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.jwt_service.generate_login_token(&account.email)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

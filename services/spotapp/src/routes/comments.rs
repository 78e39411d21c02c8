//! Comment endpoints

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::ApiResult,
    extract::{EntityId, ValidJson},
    middleware::{AuthUser, require_active},
    models::comment::{Comment, NewComment},
    repositories::comment,
    state::AppState,
};

/// Get all comments
pub async fn get_comments(State(state): State<AppState>) -> ApiResult<Json<Vec<Comment>>> {
    let mut tx = state.db_pool.begin().await?;
    let comments = comment::list_all(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(comments))
}

/// Get a comment by ID
pub async fn get_comment(
    State(state): State<AppState>,
    EntityId(comment_id): EntityId,
) -> ApiResult<Json<Comment>> {
    let mut tx = state.db_pool.begin().await?;
    let found = comment::find_by_id(&mut tx, comment_id).await?;
    tx.commit().await?;

    Ok(Json(found))
}

/// Create a comment owned by the caller
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    ValidJson(payload): ValidJson<NewComment>,
) -> ApiResult<impl IntoResponse> {
    let mut tx = state.db_pool.begin().await?;
    let owner = require_active(&mut tx, &caller).await?;
    let created = comment::create(&mut tx, &payload, owner.user_id).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}

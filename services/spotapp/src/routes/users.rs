//! User endpoints

use auth::password::hash_password;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    error::ApiResult,
    extract::{EntityId, ValidJson},
    models::{
        Message,
        user::{NewUser, UpdateUser, UserCreated, UserProfile},
    },
    repositories::user,
    state::AppState,
};

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    let mut tx = state.db_pool.begin().await?;
    let users = user::list_all(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(users.into_iter().map(UserProfile::from).collect()))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
) -> ApiResult<Json<UserProfile>> {
    let mut tx = state.db_pool.begin().await?;
    let found = user::find_by_id(&mut tx, user_id).await?;
    tx.commit().await?;

    Ok(Json(found.into()))
}

/// Sign up a new user
pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewUser>,
) -> ApiResult<impl IntoResponse> {
    let hashed_password = hash_password(&payload.password)?;

    let mut tx = state.db_pool.begin().await?;
    let created = user::create(&mut tx, &payload, &hashed_password).await?;
    tx.commit().await?;

    let location = format!("/users/{}", created.user_id);
    let body = UserCreated {
        nickname: created.nickname,
        email: created.email,
    };

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)))
}

/// Partially update a user
pub async fn update_user(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
    ValidJson(payload): ValidJson<UpdateUser>,
) -> ApiResult<impl IntoResponse> {
    let hashed_password = payload.password.as_deref().map(hash_password).transpose()?;

    let mut tx = state.db_pool.begin().await?;
    user::update(&mut tx, user_id, &payload, hashed_password).await?;
    tx.commit().await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(Message::new(format!("User with user_id={} is updated!", user_id))),
    ))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
) -> ApiResult<StatusCode> {
    let mut tx = state.db_pool.begin().await?;
    user::delete(&mut tx, user_id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

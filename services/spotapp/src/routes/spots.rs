//! Spot endpoints

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    extract::{EntityId, ValidJson, ValidQuery},
    middleware::{AuthUser, require_active},
    models::{
        Message,
        spot::{NewSpot, Spot, SpotFilter, SpotFilterParams, UpdateSpot},
    },
    repositories::spot,
    state::AppState,
};

/// Get all spots
pub async fn get_spots(State(state): State<AppState>) -> ApiResult<Json<Vec<Spot>>> {
    let mut tx = state.db_pool.begin().await?;
    let spots = spot::list_all(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(spots))
}

/// Get spots matching the query string filters
pub async fn get_filtered_spots(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<SpotFilterParams>,
) -> ApiResult<Json<Vec<Spot>>> {
    let filter = SpotFilter::try_from(params).map_err(ApiError::Validation)?;

    let mut tx = state.db_pool.begin().await?;
    let spots = spot::list_filtered(&mut tx, &filter).await?;
    tx.commit().await?;

    Ok(Json(spots))
}

/// Get a spot by ID
pub async fn get_spot(
    State(state): State<AppState>,
    EntityId(spot_id): EntityId,
) -> ApiResult<Json<Spot>> {
    let mut tx = state.db_pool.begin().await?;
    let found = spot::find_by_id(&mut tx, spot_id).await?;
    tx.commit().await?;

    Ok(Json(found))
}

/// Create a spot owned by the caller
pub async fn create_spot(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    ValidJson(payload): ValidJson<NewSpot>,
) -> ApiResult<impl IntoResponse> {
    let mut tx = state.db_pool.begin().await?;
    let owner = require_active(&mut tx, &caller).await?;
    let created = spot::create(&mut tx, &payload, owner.user_id).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update a spot
pub async fn update_spot(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    EntityId(spot_id): EntityId,
    ValidJson(payload): ValidJson<UpdateSpot>,
) -> ApiResult<impl IntoResponse> {
    let mut tx = state.db_pool.begin().await?;
    require_active(&mut tx, &caller).await?;
    spot::update(&mut tx, spot_id, &payload).await?;
    tx.commit().await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(Message::new(format!("Spot with spot_id={} is updated!", spot_id))),
    ))
}

/// Delete a spot
pub async fn delete_spot(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    EntityId(spot_id): EntityId,
) -> ApiResult<StatusCode> {
    let mut tx = state.db_pool.begin().await?;
    require_active(&mut tx, &caller).await?;
    spot::delete(&mut tx, spot_id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

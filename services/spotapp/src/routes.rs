//! Spotapp service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};

use crate::{middleware::auth_middleware, models::Message, state::AppState};

pub mod comments;
pub mod login;
pub mod spots;
pub mod users;

/// Create the router for the Spotapp service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/spots/create/", post(spots::create_spot))
        .route("/spots/:id", put(spots::update_spot))
        .route("/spots/destroy/:id", delete(spots::delete_spot))
        .route("/comments/create/", post(comments::create_comment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/login", post(login::login))
        .route("/users/all/", get(users::get_users))
        .route("/users/create/", post(users::create_user))
        .route("/users/:id", get(users::get_user).put(users::update_user))
        .route("/users/destroy/:id", delete(users::delete_user))
        .route("/spots/all/", get(spots::get_spots))
        .route("/spots/filtered/", get(spots::get_filtered_spots))
        .route("/spots/:id", get(spots::get_spot))
        .route("/comments/all/", get(comments::get_comments))
        .route("/comments/:id", get(comments::get_comment))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(Message::new("Just a health check"))
}

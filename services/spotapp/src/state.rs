//! Application state shared across handlers

use auth::JwtService;
use sqlx::PgPool;

/// Application state shared across handlers
///
/// The pool is only used to open one transaction per request; data access
/// functions receive that transaction, never the pool.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
}

impl AppState {
    pub fn new(db_pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            db_pool,
            jwt_service,
        }
    }
}

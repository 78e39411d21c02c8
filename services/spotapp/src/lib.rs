//! Spotapp HTTP service
//!
//! Users register, log in, and share spots (places) with comments.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

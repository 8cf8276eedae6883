//! Versioned v1 API endpoints

pub mod users;

use axum::{routing::post, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/user/create", post(users::create_user))
}

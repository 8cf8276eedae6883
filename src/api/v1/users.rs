//! User endpoint handlers

use axum::{extract::State, http::StatusCode};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CreateUserApiRequest, Json};

/// POST /v1/user/create
///
/// 204 on creation, 409 `user_exists` when the id is taken. The body is
/// decoded before the handler runs, so a bad payload never reaches the store.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = request.id, "Creating user");

    state
        .user_service
        .create(request.into())
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

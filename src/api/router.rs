use axum::{middleware, routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::v1;

/// Create the full router with application state
///
/// Layers run outermost first: an `x-request-id` is assigned (a UUID unless
/// the client sent one), traced, echoed on the response, then logged.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probes
        .route("/ping", get(health::ping))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Versioned API
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

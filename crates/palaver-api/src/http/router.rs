//! Axum router configuration with middleware.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the webhook router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/hooks/{platform}",
            get(handlers::hooks::subscribe).post(handlers::hooks::receive),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

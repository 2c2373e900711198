//! Liveness endpoint.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /health - Report server liveness and bound platforms.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "platforms": state.hooks.names(),
    }))
}

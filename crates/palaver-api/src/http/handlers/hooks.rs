//! Webhook routes: subscription challenge and event intake.
//!
//! `GET /hooks/{platform}` answers the platform's one-time subscription
//! challenge. `POST /hooks/{platform}` verifies the body signature, parses
//! events into requests, and acknowledges with the event count. Dialogue
//! dispatch is not wired here; in echo mode each text request runs one
//! responder turn that sends the text straight back.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use serde_json::json;
use tracing::{debug, info, warn};

use palaver_core::engine::BoxPlatform;
use palaver_platforms::messenger::MessengerPlatform;

use crate::http::error::AppError;
use crate::state::AppState;
use crate::turn;

/// GET /hooks/{platform} - Answer a webhook subscription challenge.
///
/// The challenge string is returned as a raw body, as Messenger expects.
pub async fn subscribe(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, AppError> {
    let hook = state.hooks.get(&platform)?;
    let challenge = hook.subscribe_challenge(&params)?;
    info!(%platform, "webhook subscription verified");
    Ok(challenge)
}

/// POST /hooks/{platform} - Receive an event delivery.
///
/// The raw body is verified against the platform's signature header before
/// any parsing. Echo-turn failures are logged, not surfaced: a non-200
/// answer would make the platform redeliver the whole batch.
pub async fn receive(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let hook = state.hooks.get(&platform)?;

    let signature = headers
        .get("x-hub-signature-256")
        .and_then(|v| v.to_str().ok());
    hook.verify_signature(&body, signature)?;

    let requests = hook.parse_events(&body)?;
    info!(%platform, events = requests.len(), "received webhook events");

    if state.echo {
        if let Some(app) = &state.messenger {
            for request in &requests {
                if request.text().is_none() {
                    continue;
                }
                let binding = BoxPlatform::new(MessengerPlatform::new(
                    Arc::clone(app),
                    request.user_id.clone(),
                ));
                match turn::run_echo_turn(binding, request).await {
                    Ok(register) => {
                        debug!(request = %request.id, ?register, "echo turn complete");
                    }
                    Err(err) => {
                        warn!(request = %request.id, %err, "echo turn failed");
                    }
                }
            }
        }
    }

    Ok(Json(json!({ "received": requests.len() })))
}

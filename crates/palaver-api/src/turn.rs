//! Echo smoke turn: one real responder cycle over a type-erased platform.
//!
//! Dialogue dispatch proper lives outside this server; the echo turn exists
//! so a deployment can verify the whole outbound pipeline (validate, queue,
//! flush, derive register) end to end before wiring in dialogue logic.

use std::sync::Arc;

use palaver_core::engine::{BoxPlatform, Responder, ResponderError};
use palaver_types::layer::Layer;
use palaver_types::register::Register;
use palaver_types::request::Request;

/// Run one echo turn: reply with the request's own text, flush, and return
/// the transition register the turn produced.
///
/// Requests without text produce no output and an empty register.
pub async fn run_echo_turn(
    platform: BoxPlatform,
    request: &Request,
) -> Result<Register, ResponderError> {
    let mut responder = Responder::new(Arc::new(platform));

    let Some(text) = request.text() else {
        return Ok(Register::new());
    };

    responder.send(vec![
        Layer::Typing { duration_ms: 300 },
        Layer::Text {
            text: text.to_string(),
        },
    ])?;
    responder.flush().await?;

    Ok(responder.make_transition_register(request))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Inbound conversational request context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One inbound conversational event, as parsed by a platform adapter.
///
/// Conversation and user ids are platform-scoped opaque strings (e.g.
/// Messenger PSIDs), not internal entities. The payload is flexible JSON to
/// accommodate whatever the platform delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// UUIDv7 internal request id.
    pub id: Uuid,
    /// Name of the platform that produced this request (e.g. "messenger").
    pub platform: String,
    /// Platform-scoped conversation identifier.
    pub conversation_id: String,
    /// Platform-scoped user identifier.
    pub user_id: String,
    /// Raw event payload.
    pub payload: serde_json::Value,
    /// When the event was received.
    pub received_at: DateTime<Utc>,
}

impl Request {
    /// Build a request for an event received now.
    pub fn new(
        platform: impl Into<String>,
        conversation_id: impl Into<String>,
        user_id: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            platform: platform.into(),
            conversation_id: conversation_id.into(),
            user_id: user_id.into(),
            payload,
            received_at: Utc::now(),
        }
    }

    /// The inbound message text, when the payload carries one.
    pub fn text(&self) -> Option<&str> {
        self.payload.get("text").and_then(|v| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_json_roundtrip() {
        let req = Request::new("messenger", "conv-9", "psid-42", json!({"text": "hello"}));
        let json_str = serde_json::to_string(&req).unwrap();
        assert!(json_str.contains("\"platform\":\"messenger\""));

        let parsed: Request = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.conversation_id, "conv-9");
        assert_eq!(parsed.user_id, "psid-42");
        assert_eq!(parsed.text(), Some("hello"));
    }

    #[test]
    fn text_absent_when_payload_has_none() {
        let req = Request::new("messenger", "c", "u", json!({"attachment": "img"}));
        assert!(req.text().is_none());
    }
}

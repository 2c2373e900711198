//! Facebook Messenger binding.
//!
//! Split into two scopes, mirroring how a page serves many conversations:
//!
//! - [`MessengerApp`] is page-scoped and shared: it owns the HTTP client and
//!   credentials, implements the inbound [`Webhook`] intake, and performs the
//!   Graph API send call.
//! - [`MessengerPlatform`] is conversation-scoped: one instance per recipient,
//!   holding the shared app plus the recipient PSID. It implements the core
//!   [`Platform`] contract, so a `Responder` bound to it replies to exactly
//!   one user.

pub mod verify;

use std::collections::HashMap;
use std::sync::Arc;

use palaver_core::engine::Platform;
use palaver_types::config::MessengerConfig;
use palaver_types::error::PlatformError;
use palaver_types::layer::Layer;
use palaver_types::request::Request;
use palaver_types::stack::Stack;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::webhook::Webhook;

/// Messenger caps quick replies at 13 per message.
const MAX_QUICK_REPLIES: usize = 13;

/// Messenger caps message text at 2000 characters.
const MAX_TEXT_LEN: usize = 2000;

/// Page-scoped Messenger binding: credentials, HTTP client, webhook intake.
pub struct MessengerApp {
    http: reqwest::Client,
    page_token: SecretString,
    app_secret: SecretString,
    verify_token: String,
    api_base: String,
}

impl MessengerApp {
    /// Build the binding from its configuration section.
    pub fn new(config: &MessengerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            page_token: SecretString::from(config.page_token.expose_secret().to_string()),
            app_secret: SecretString::from(config.app_secret.expose_secret().to_string()),
            verify_token: config.verify_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Send one stack to a recipient via the Graph send API.
    ///
    /// The payload carries the stack's layers in their tagged serde form;
    /// full per-layer wire rendering belongs to a dedicated rendering layer,
    /// not this binding.
    pub async fn send_message(&self, recipient: &str, stack: &Stack) -> Result<(), PlatformError> {
        let url = format!("{}/me/messages", self.api_base);
        let payload = json!({
            "recipient": { "id": recipient },
            "message": { "layers": stack.layers() },
        });

        let response = self
            .http
            .post(&url)
            .query(&[("access_token", self.page_token.expose_secret())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!(recipient, layers = stack.len(), "sent message stack");
        Ok(())
    }
}

impl Webhook for MessengerApp {
    fn platform(&self) -> &str {
        "messenger"
    }

    fn subscribe_challenge(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<String, PlatformError> {
        verify::subscribe_challenge(params, &self.verify_token)
    }

    fn verify_signature(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), PlatformError> {
        verify::verify_signature(self.app_secret.expose_secret().as_bytes(), body, signature)
    }

    fn parse_events(&self, body: &[u8]) -> Result<Vec<Request>, PlatformError> {
        let payload: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| PlatformError::MalformedPayload(e.to_string()))?;

        if payload.get("object").and_then(|v| v.as_str()) != Some("page") {
            return Err(PlatformError::MalformedPayload(
                "expected a page event delivery".to_string(),
            ));
        }

        let mut requests = Vec::new();
        let entries = payload
            .get("entry")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        for entry in entries {
            let messagings = entry
                .get("messaging")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();

            for event in messagings {
                let Some(sender) = event
                    .get("sender")
                    .and_then(|s| s.get("id"))
                    .and_then(|v| v.as_str())
                else {
                    // Delivery receipts and read events carry no usable sender.
                    continue;
                };

                let text = event
                    .get("message")
                    .and_then(|m| m.get("text"))
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);

                requests.push(Request::new(
                    self.platform(),
                    sender,
                    sender,
                    json!({ "text": text, "event": event }),
                ));
            }
        }

        Ok(requests)
    }
}

impl std::fmt::Debug for MessengerApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessengerApp")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Conversation-scoped Messenger binding: the shared app plus one recipient.
pub struct MessengerPlatform {
    app: Arc<MessengerApp>,
    recipient: String,
}

impl MessengerPlatform {
    /// Scope the page binding to one recipient PSID.
    pub fn new(app: Arc<MessengerApp>, recipient: impl Into<String>) -> Self {
        Self {
            app,
            recipient: recipient.into(),
        }
    }
}

impl Platform for MessengerPlatform {
    fn name(&self) -> &str {
        "messenger"
    }

    /// Messenger capability gate.
    ///
    /// Text is capped at 2000 characters; at most one quick-replies layer is
    /// allowed, it must be the last layer, and it must carry 1..=13 choices.
    fn accept(&self, stack: &Stack) -> bool {
        let last = stack.len().saturating_sub(1);
        stack.layers().iter().enumerate().all(|(i, layer)| match layer {
            Layer::Text { text } | Layer::RawText { text } => text.chars().count() <= MAX_TEXT_LEN,
            Layer::Image { .. } | Layer::Typing { .. } => true,
            Layer::QuickReplies { choices } => {
                i == last && !choices.is_empty() && choices.len() <= MAX_QUICK_REPLIES
            }
        })
    }

    async fn transmit(&self, stack: &Stack) -> Result<(), PlatformError> {
        self.app.send_message(&self.recipient, stack).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_types::layer::Choice;

    fn app() -> Arc<MessengerApp> {
        let config: MessengerConfig = toml_config(
            r#"
            page_token = "pt"
            app_secret = "as"
            verify_token = "vt"
            "#,
        );
        Arc::new(MessengerApp::new(&config))
    }

    fn toml_config(body: &str) -> MessengerConfig {
        // serde path shared with the real loader.
        toml::from_str(body).unwrap()
    }

    fn platform() -> MessengerPlatform {
        MessengerPlatform::new(app(), "psid-1")
    }

    fn choices(n: usize) -> Vec<Choice> {
        (0..n)
            .map(|i| Choice {
                slug: format!("c{i}"),
                text: format!("Choice {i}"),
                intent: None,
            })
            .collect()
    }

    #[test]
    fn accepts_text_and_trailing_quick_replies() {
        let stack = Stack::new(vec![
            Layer::Text {
                text: "pick one".to_string(),
            },
            Layer::QuickReplies {
                choices: choices(3),
            },
        ]);
        assert!(platform().accept(&stack));
    }

    #[test]
    fn rejects_quick_replies_not_in_last_position() {
        let stack = Stack::new(vec![
            Layer::QuickReplies {
                choices: choices(3),
            },
            Layer::Text {
                text: "after".to_string(),
            },
        ]);
        assert!(!platform().accept(&stack));
    }

    #[test]
    fn rejects_too_many_quick_replies() {
        let stack = Stack::new(vec![Layer::QuickReplies {
            choices: choices(MAX_QUICK_REPLIES + 1),
        }]);
        assert!(!platform().accept(&stack));

        let at_limit = Stack::new(vec![Layer::QuickReplies {
            choices: choices(MAX_QUICK_REPLIES),
        }]);
        assert!(platform().accept(&at_limit));
    }

    #[test]
    fn rejects_empty_quick_replies() {
        let stack = Stack::new(vec![Layer::QuickReplies { choices: vec![] }]);
        assert!(!platform().accept(&stack));
    }

    #[test]
    fn rejects_oversized_text() {
        let stack = Stack::new(vec![Layer::Text {
            text: "x".repeat(MAX_TEXT_LEN + 1),
        }]);
        assert!(!platform().accept(&stack));

        let at_limit = Stack::new(vec![Layer::Text {
            text: "x".repeat(MAX_TEXT_LEN),
        }]);
        assert!(platform().accept(&at_limit));
    }

    #[test]
    fn parse_events_extracts_text_requests() {
        let body = serde_json::to_vec(&json!({
            "object": "page",
            "entry": [{
                "id": "page-1",
                "messaging": [
                    {
                        "sender": { "id": "psid-7" },
                        "recipient": { "id": "page-1" },
                        "message": { "text": "hello there" }
                    },
                    {
                        // Read receipt: no sender id -> skipped.
                        "read": { "watermark": 1 }
                    }
                ]
            }]
        }))
        .unwrap();

        let requests = app().parse_events(&body).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].platform, "messenger");
        assert_eq!(requests[0].user_id, "psid-7");
        assert_eq!(requests[0].conversation_id, "psid-7");
        assert_eq!(requests[0].text(), Some("hello there"));
    }

    #[test]
    fn parse_events_rejects_non_page_object() {
        let body = br#"{"object":"user","entry":[]}"#;
        let err = app().parse_events(body).unwrap_err();
        assert!(matches!(err, PlatformError::MalformedPayload(_)));
    }

    #[test]
    fn parse_events_rejects_invalid_json() {
        let err = app().parse_events(b"not json").unwrap_err();
        assert!(matches!(err, PlatformError::MalformedPayload(_)));
    }

    #[test]
    fn webhook_platform_name() {
        assert_eq!(Webhook::platform(&*app()), "messenger");
    }
}

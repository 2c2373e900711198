//! Message layer types for Palaver.
//!
//! A `Layer` is one unit of outgoing message content or behavior. Layers are
//! bundled into a `Stack` and sent through a `Responder`. The serde
//! representation is tagged so platform adapters can serialize layers
//! directly into webhook payloads.

use serde::{Deserialize, Serialize};

use crate::register::Register;
use crate::request::Request;

/// Register key under which quick-reply choices are recorded for the next
/// dialogue state.
pub const CHOICES_KEY: &str = "choices";

/// One unit of outgoing message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    /// Plain text, subject to platform length limits.
    Text { text: String },
    /// Text sent as-is, bypassing any templating the dialogue layer applies.
    RawText { text: String },
    /// An image referenced by URL.
    Image { url: String },
    /// A set of tappable quick-reply options attached to the message.
    QuickReplies { choices: Vec<Choice> },
    /// A typing indicator shown for the given duration.
    Typing { duration_ms: u64 },
}

/// One quick-reply option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    /// Stable identifier for the option, unique within its layer.
    pub slug: String,
    /// Text shown on the button.
    pub text: String,
    /// Intent to trigger when the user picks this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

impl Layer {
    /// Stable name of the layer kind, used by `Stack::describe`.
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Text { .. } => "text",
            Layer::RawText { .. } => "raw_text",
            Layer::Image { .. } => "image",
            Layer::QuickReplies { .. } => "quick_replies",
            Layer::Typing { .. } => "typing",
        }
    }

    /// Fold this layer's contribution into the transition register.
    ///
    /// Only `QuickReplies` contributes: it records its choices under
    /// [`CHOICES_KEY`] so the next dialogue state can interpret the user's
    /// answer. The request is available for layers whose contribution depends
    /// on inbound context.
    pub fn patch_register(&self, register: &mut Register, _request: &Request) {
        if let Layer::QuickReplies { choices } = self {
            let mut map = serde_json::Map::new();
            for choice in choices {
                map.insert(
                    choice.slug.clone(),
                    serde_json::json!({
                        "text": choice.text,
                        "intent": choice.intent,
                    }),
                );
            }
            register.insert(CHOICES_KEY.to_string(), serde_json::Value::Object(map));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> Request {
        Request::new("messenger", "conv-1", "user-1", json!({"text": "hi"}))
    }

    #[test]
    fn layer_kind_names() {
        let text = Layer::Text {
            text: "hello".to_string(),
        };
        assert_eq!(text.kind(), "text");
        let qr = Layer::QuickReplies { choices: vec![] };
        assert_eq!(qr.kind(), "quick_replies");
    }

    #[test]
    fn layer_serde_tagged() {
        let layer = Layer::Text {
            text: "hello".to_string(),
        };
        let json_str = serde_json::to_string(&layer).unwrap();
        assert!(json_str.contains("\"kind\":\"text\""));

        let parsed: Layer = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed, layer);
    }

    #[test]
    fn quick_replies_patch_register_records_choices() {
        let layer = Layer::QuickReplies {
            choices: vec![
                Choice {
                    slug: "yes".to_string(),
                    text: "Yes please".to_string(),
                    intent: Some("CONFIRM".to_string()),
                },
                Choice {
                    slug: "no".to_string(),
                    text: "No thanks".to_string(),
                    intent: None,
                },
            ],
        };

        let mut register = Register::new();
        layer.patch_register(&mut register, &request());

        let choices = register.get(CHOICES_KEY).unwrap();
        assert_eq!(choices["yes"]["intent"], "CONFIRM");
        assert_eq!(choices["no"]["text"], "No thanks");
        assert_eq!(choices["no"]["intent"], serde_json::Value::Null);
    }

    #[test]
    fn text_patch_register_contributes_nothing() {
        let layer = Layer::Text {
            text: "hello".to_string(),
        };
        let mut register = Register::new();
        layer.patch_register(&mut register, &request());
        assert!(register.is_empty());
    }

    #[test]
    fn choice_serde_omits_missing_intent() {
        let choice = Choice {
            slug: "maybe".to_string(),
            text: "Maybe".to_string(),
            intent: None,
        };
        let json_str = serde_json::to_string(&choice).unwrap();
        assert!(!json_str.contains("intent"));
    }
}

//! Framework configuration types.
//!
//! Deserialized from `palaver.toml` by the loader in `palaver-platforms`.
//! Every field has a default so a missing or partial file still yields a
//! usable configuration.

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level framework configuration.
#[derive(Debug, Default, Deserialize)]
pub struct FrameworkConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Facebook Messenger binding; absent means the platform is not bound.
    #[serde(default)]
    pub messenger: Option<MessengerConfig>,
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the webhook server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Facebook Messenger binding settings.
#[derive(Debug, Deserialize)]
pub struct MessengerConfig {
    /// Page access token for the Graph send API.
    pub page_token: SecretString,
    /// App secret used to verify webhook body signatures.
    pub app_secret: SecretString,
    /// Token echoed back during webhook subscription.
    pub verify_token: String,
    /// Graph API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// When true, echo inbound text back to the sender (smoke-test mode).
    #[serde(default)]
    pub echo: bool,
}

fn default_api_base() -> String {
    "https://graph.facebook.com/v19.0".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

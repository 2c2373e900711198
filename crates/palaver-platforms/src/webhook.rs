//! Inbound webhook seam: per-platform intake contract and registry.
//!
//! The HTTP layer resolves `/hooks/{platform}` through the
//! [`WebhookRegistry`] and drives the three intake steps -- subscribe
//! challenge, body signature verification, event parsing -- without knowing
//! any platform's wire format.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use palaver_core::engine::ResponderError;
use palaver_types::error::PlatformError;
use palaver_types::request::Request;
use tracing::debug;

/// Inbound intake contract every platform binding supplies.
///
/// All methods are synchronous: verification and parsing work on bytes the
/// HTTP layer already holds.
pub trait Webhook: Send + Sync {
    /// Platform name this hook serves (registry key).
    fn platform(&self) -> &str;

    /// Answer a webhook subscription challenge.
    ///
    /// Returns the challenge string to echo back, or an error when the
    /// request does not prove knowledge of the verify token.
    fn subscribe_challenge(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<String, PlatformError>;

    /// Verify the body signature of an event delivery.
    fn verify_signature(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), PlatformError>;

    /// Parse a verified event delivery into conversational requests.
    fn parse_events(&self, body: &[u8]) -> Result<Vec<Request>, PlatformError>;
}

/// Registry of webhook intakes, keyed by platform name.
pub struct WebhookRegistry {
    hooks: DashMap<String, Arc<dyn Webhook>>,
}

impl WebhookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            hooks: DashMap::new(),
        }
    }

    /// Register a hook under its platform name, replacing any previous one.
    pub fn register(&self, hook: Arc<dyn Webhook>) {
        let name = hook.platform().to_string();
        debug!(platform = %name, "registered webhook intake");
        self.hooks.insert(name, hook);
    }

    /// Look up the hook for a platform name.
    pub fn get(&self, platform: &str) -> Result<Arc<dyn Webhook>, ResponderError> {
        self.hooks
            .get(platform)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ResponderError::NotConfigured {
                platform: platform.to_string(),
            })
    }

    /// Names of all registered platforms.
    pub fn names(&self) -> Vec<String> {
        self.hooks.iter().map(|e| e.key().clone()).collect()
    }
}

impl Default for WebhookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WebhookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookRegistry")
            .field("platforms", &self.hooks.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

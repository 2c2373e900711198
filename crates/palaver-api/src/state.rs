//! Shared application state for the webhook server.

use std::sync::Arc;

use palaver_platforms::messenger::MessengerApp;
use palaver_platforms::webhook::{Webhook, WebhookRegistry};
use palaver_types::config::FrameworkConfig;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Webhook intakes keyed by platform name.
    pub hooks: Arc<WebhookRegistry>,
    /// Page-scoped Messenger binding, when configured.
    pub messenger: Option<Arc<MessengerApp>>,
    /// Whether inbound text is echoed back to the sender (smoke-test mode).
    pub echo: bool,
    /// Address the server binds to.
    pub bind_addr: String,
}

impl AppState {
    /// Build state from configuration, registering every configured platform.
    pub fn from_config(config: &FrameworkConfig) -> Self {
        let hooks = Arc::new(WebhookRegistry::new());
        let mut messenger = None;
        let mut echo = false;

        if let Some(messenger_config) = &config.messenger {
            let app = Arc::new(MessengerApp::new(messenger_config));
            hooks.register(Arc::clone(&app) as Arc<dyn Webhook>);
            echo = messenger_config.echo;
            messenger = Some(app);
        }

        Self {
            hooks,
            messenger,
            echo,
            bind_addr: config.server.bind_addr.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_binds_no_platforms() {
        let config = FrameworkConfig::default();
        let state = AppState::from_config(&config);

        assert!(state.hooks.names().is_empty());
        assert!(state.messenger.is_none());
        assert!(!state.echo);
        assert_eq!(state.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn messenger_section_registers_intake() {
        let config: FrameworkConfig = toml::from_str(
            r#"
            [messenger]
            page_token = "pt"
            app_secret = "as"
            verify_token = "vt"
            echo = true
            "#,
        )
        .unwrap();
        let state = AppState::from_config(&config);

        assert_eq!(state.hooks.names(), vec!["messenger".to_string()]);
        assert!(state.messenger.is_some());
        assert!(state.echo);
    }
}

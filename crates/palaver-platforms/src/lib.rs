//! Concrete chat-platform bindings for Palaver.
//!
//! Implements the `Platform` transmission contract from `palaver-core` for
//! real chat services (currently Facebook Messenger), the inbound `Webhook`
//! intake seam, and the TOML configuration loader.

pub mod config;
pub mod messenger;
pub mod webhook;

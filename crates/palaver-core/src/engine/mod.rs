//! The conversational engine: platform contracts and the responder.

pub mod platform;
pub mod responder;

pub use platform::{BoxPlatform, Platform};
pub use responder::{Responder, ResponderError};

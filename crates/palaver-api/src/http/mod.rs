//! HTTP surface: router, handlers, error mapping.

pub mod error;
pub mod handlers;
pub mod router;

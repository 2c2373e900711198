//! Shared domain types for Palaver.
//!
//! This crate contains the core domain types used across the Palaver
//! framework: Layer, Stack, Register, Request, and the platform error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! secrecy.

pub mod config;
pub mod error;
pub mod layer;
pub mod register;
pub mod request;
pub mod stack;

//! Responder engine and platform contracts for Palaver.
//!
//! This crate defines the `Platform` trait (the capability gate and
//! transmission hook every binding implements) and the `Responder` that
//! accumulates, validates, and flushes outgoing message stacks for one
//! conversational turn. It depends only on `palaver-types` -- never on any
//! HTTP or platform-SDK crate.

pub mod engine;

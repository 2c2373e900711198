//! The transition register: conversation-state keys produced by a turn.
//!
//! Built fresh on each call to `Responder::make_transition_register` by
//! folding every queued stack's contribution in queue order. Persistence
//! belongs to the caller, not to this crate.

use std::collections::BTreeMap;

/// Mapping from conversation-state key to value.
///
/// A `BTreeMap` keeps iteration deterministic for logging and tests; values
/// stay flexible JSON so layers can record arbitrary structure.
pub type Register = BTreeMap<String, serde_json::Value>;

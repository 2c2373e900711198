//! The responder: per-turn accumulation and flushing of outgoing stacks.
//!
//! One `Responder` instance serves one conversational turn. Dialogue logic
//! calls [`Responder::send`] zero or more times, then the framework calls
//! [`Responder::flush`] to transmit everything in submission order and
//! [`Responder::make_transition_register`] to derive the next conversation
//! state from what was queued.

use std::sync::Arc;

use palaver_types::error::PlatformError;
use palaver_types::register::Register;
use palaver_types::request::Request;
use palaver_types::stack::Stack;
use thiserror::Error;
use tracing::debug;

use super::platform::Platform;

/// Errors that can occur during responder operations.
#[derive(Debug, Error)]
pub enum ResponderError {
    /// The platform's capability gate rejected the stack.
    #[error("the platform does not accept \"{description}\"")]
    Unacceptable {
        /// `Stack::describe()` output for the rejected stack.
        description: String,
    },

    /// No platform binding is registered under the given name.
    ///
    /// A configuration error, not a runtime condition: the deployment names
    /// a platform it never bound.
    #[error("no platform binding configured for '{platform}'")]
    NotConfigured { platform: String },

    /// A platform binding failed while transmitting a stack.
    #[error("transmission failed: {source}")]
    Transmission {
        #[from]
        source: PlatformError,
    },
}

/// Accumulates, validates, and transmits outgoing message stacks for one
/// conversational turn.
///
/// Every stack passes the platform's `accept` gate before it is queued, so
/// the queue never holds an unvalidated stack. Queue order is submission
/// order and is preserved through `flush`.
///
/// `flush` does NOT clear the queue: a second `flush` without an intervening
/// [`Responder::clear`] retransmits everything. Avoiding duplicate delivery
/// across retries is the caller's responsibility.
pub struct Responder<P: Platform> {
    platform: Arc<P>,
    stacks: Vec<Stack>,
}

impl<P: Platform> Responder<P> {
    /// Bind a responder to a platform for its lifetime, with an empty queue.
    pub fn new(platform: Arc<P>) -> Self {
        Self {
            platform,
            stacks: Vec::new(),
        }
    }

    /// Validate a stack against the platform and append it to the queue.
    ///
    /// Accepts a pre-built [`Stack`] or anything that normalizes into one
    /// (a `Vec<Layer>` or a single `Layer`). Normalization happens before
    /// the acceptance check.
    ///
    /// On rejection the queue is left untouched and the error message embeds
    /// the stack's description. Duplicates are allowed: sending the same
    /// content twice queues it twice.
    pub fn send(&mut self, stack: impl Into<Stack>) -> Result<(), ResponderError> {
        let stack = stack.into();

        if !self.platform.accept(&stack) {
            return Err(ResponderError::Unacceptable {
                description: stack.describe(),
            });
        }

        debug!(
            platform = self.platform.name(),
            stack = %stack.describe(),
            queued = self.stacks.len() + 1,
            "queued stack"
        );
        self.stacks.push(stack);
        Ok(())
    }

    /// Reset the queue to empty. Idempotent, never fails.
    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    /// The stacks currently queued, in submission order.
    pub fn queued(&self) -> &[Stack] {
        &self.stacks
    }

    /// Transmit every queued stack, strictly in queue order.
    ///
    /// Each transmission is awaited before the next starts -- no concurrent
    /// fan-out, so message ordering on the wire matches submission order. On
    /// the first failure the error surfaces immediately and the remaining
    /// stacks are not attempted; stacks transmitted before the failure stay
    /// transmitted. No retry, no rollback.
    ///
    /// The queue is left intact; call [`Responder::clear`] once the turn's
    /// output is fully disposed of. The exclusive receiver makes overlapped
    /// flushes of one responder unrepresentable.
    pub async fn flush(&mut self) -> Result<(), ResponderError> {
        debug!(
            platform = self.platform.name(),
            stacks = self.stacks.len(),
            "flushing responder queue"
        );

        for stack in &self.stacks {
            self.platform.transmit(stack).await?;
        }

        Ok(())
    }

    /// Derive the transition register from the queued stacks.
    ///
    /// Left-fold of each stack's `patch_register` over the queue in order,
    /// starting from an empty register; a later stack can read and override
    /// keys written by earlier ones. Reflects what is queued, not what was
    /// flushed, and does not mutate the responder.
    pub fn make_transition_register(&self, request: &Request) -> Register {
        let mut register = Register::new();
        for stack in &self.stacks {
            register = stack.patch_register(register, request);
        }
        register
    }
}

impl<P: Platform> std::fmt::Debug for Responder<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("platform", &self.platform.name())
            .field("queued", &self.stacks.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Message stacks: ordered bundles of layers forming one outgoing unit.

use serde::{Deserialize, Serialize};

use crate::layer::Layer;
use crate::register::Register;
use crate::request::Request;

/// An ordered, immutable-once-built sequence of message layers.
///
/// One stack is one coherent outgoing message unit. Dialogue logic builds a
/// stack (or a plain `Vec<Layer>`, normalized via `From`) and hands it to the
/// responder, which owns it exclusively from then on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stack {
    layers: Vec<Layer>,
}

impl Stack {
    /// Build a stack from an ordered sequence of layers.
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// The layers in submission order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers in the stack.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Human-readable description of the stack, for error messages.
    ///
    /// Comma-joined layer kind names, e.g. `"text, quick_replies"`.
    pub fn describe(&self) -> String {
        self.layers
            .iter()
            .map(Layer::kind)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Fold every layer's contribution into the given register, in layer
    /// order, and return the result.
    ///
    /// Pure with respect to the stack; later layers can read and override
    /// keys written by earlier ones.
    pub fn patch_register(&self, mut register: Register, request: &Request) -> Register {
        for layer in &self.layers {
            layer.patch_register(&mut register, request);
        }
        register
    }
}

impl From<Vec<Layer>> for Stack {
    fn from(layers: Vec<Layer>) -> Self {
        Stack::new(layers)
    }
}

impl From<Layer> for Stack {
    fn from(layer: Layer) -> Self {
        Stack::new(vec![layer])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

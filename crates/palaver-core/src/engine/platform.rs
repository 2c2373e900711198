//! Platform trait definition.
//!
//! A `Platform` is the capability every chat-service binding supplies at
//! responder construction: a pure acceptance predicate and the asynchronous
//! transmission hook. Supplying it up front replaces the
//! override-or-fail-at-flush pattern with a compile-time requirement.
//!
//! Uses RPITIT for `transmit`; the `BoxPlatform` wrapper provides dynamic
//! dispatch where bindings are selected at runtime.

use std::future::Future;
use std::pin::Pin;

use palaver_types::error::PlatformError;
use palaver_types::stack::Stack;

/// Capability contract for a chat-platform binding.
///
/// Implementations live in `palaver-platforms` (e.g. the Messenger binding).
/// A binding instance is scoped to whatever it needs to reply -- typically
/// one conversation -- and is shared read-only across the responder's life.
pub trait Platform: Send + Sync {
    /// Platform name (e.g. "messenger").
    fn name(&self) -> &str;

    /// Whether the platform can represent the given stack.
    ///
    /// Pure predicate, called once per `Responder::send`.
    fn accept(&self, stack: &Stack) -> bool;

    /// Perform the platform-specific transmission of one stack.
    fn transmit(
        &self,
        stack: &Stack,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

/// Object-safe version of [`Platform`] with a boxed transmit future.
///
/// Exists solely to enable dynamic dispatch; a blanket implementation covers
/// every `Platform`.
pub trait PlatformDyn: Send + Sync {
    fn name(&self) -> &str;

    fn accept(&self, stack: &Stack) -> bool;

    fn transmit_boxed<'a>(
        &'a self,
        stack: &'a Stack,
    ) -> Pin<Box<dyn Future<Output = Result<(), PlatformError>> + Send + 'a>>;
}

/// Blanket implementation: any `Platform` automatically implements `PlatformDyn`.
impl<T: Platform> PlatformDyn for T {
    fn name(&self) -> &str {
        Platform::name(self)
    }

    fn accept(&self, stack: &Stack) -> bool {
        Platform::accept(self, stack)
    }

    fn transmit_boxed<'a>(
        &'a self,
        stack: &'a Stack,
    ) -> Pin<Box<dyn Future<Output = Result<(), PlatformError>> + Send + 'a>> {
        Box::pin(self.transmit(stack))
    }
}

/// Type-erased platform binding for runtime selection.
///
/// Since `Platform` uses RPITIT it cannot be a trait object directly;
/// `BoxPlatform` wraps any binding behind `PlatformDyn` and itself implements
/// `Platform`, so `Responder<BoxPlatform>` works unchanged.
pub struct BoxPlatform {
    inner: Box<dyn PlatformDyn>,
}

impl BoxPlatform {
    /// Wrap a concrete binding in a type-erased box.
    pub fn new<T: Platform + 'static>(platform: T) -> Self {
        Self {
            inner: Box::new(platform),
        }
    }
}

impl Platform for BoxPlatform {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn accept(&self, stack: &Stack) -> bool {
        self.inner.accept(stack)
    }

    async fn transmit(&self, stack: &Stack) -> Result<(), PlatformError> {
        self.inner.transmit_boxed(stack).await
    }
}

impl std::fmt::Debug for BoxPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxPlatform")
            .field("name", &self.inner.name())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use thiserror::Error;

/// Errors raised by platform bindings.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The platform API answered with a non-success status.
    #[error("platform returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The platform could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// Webhook body signature verification failed.
    #[error("webhook signature verification failed")]
    InvalidSignature,

    /// Webhook subscribe challenge carried the wrong verify token.
    #[error("webhook verify token mismatch")]
    VerifyTokenMismatch,

    /// Inbound payload could not be parsed.
    #[error("malformed platform payload: {0}")]
    MalformedPayload(String),

    /// The binding is misconfigured (bad key, missing credential).
    #[error("platform configuration error: {0}")]
    Config(String),
}

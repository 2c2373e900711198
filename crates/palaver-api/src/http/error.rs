//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use palaver_core::engine::ResponderError;
use palaver_types::error::PlatformError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Responder engine errors.
    Responder(ResponderError),
    /// Platform binding errors.
    Platform(PlatformError),
}

impl From<ResponderError> for AppError {
    fn from(e: ResponderError) -> Self {
        AppError::Responder(e)
    }
}

impl From<PlatformError> for AppError {
    fn from(e: PlatformError) -> Self {
        AppError::Platform(e)
    }
}

impl AppError {
    /// Status code, machine code, and message for this error.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Responder(ResponderError::NotConfigured { platform }) => (
                StatusCode::NOT_FOUND,
                "PLATFORM_NOT_CONFIGURED",
                format!("No platform binding configured for '{platform}'"),
            ),
            AppError::Responder(e @ ResponderError::Unacceptable { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UNACCEPTABLE_STACK",
                e.to_string(),
            ),
            AppError::Responder(e @ ResponderError::Transmission { .. }) => (
                StatusCode::BAD_GATEWAY,
                "TRANSMISSION_FAILED",
                e.to_string(),
            ),
            AppError::Platform(PlatformError::InvalidSignature)
            | AppError::Platform(PlatformError::VerifyTokenMismatch) => (
                StatusCode::UNAUTHORIZED,
                "WEBHOOK_VERIFICATION_FAILED",
                "Webhook verification failed".to_string(),
            ),
            AppError::Platform(e @ PlatformError::MalformedPayload(_)) => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_PAYLOAD",
                e.to_string(),
            ),
            AppError::Platform(e @ PlatformError::Http { .. })
            | AppError::Platform(e @ PlatformError::Network(_)) => {
                (StatusCode::BAD_GATEWAY, "PLATFORM_ERROR", e.to_string())
            }
            AppError::Platform(e @ PlatformError::Config(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                e.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = axum::Json(json!({
            "success": false,
            "error": { "code": code, "message": message },
        }));
        (status, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_maps_to_404() {
        let err = AppError::from(ResponderError::NotConfigured {
            platform: "telegram".to_string(),
        });
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "PLATFORM_NOT_CONFIGURED");
        assert!(message.contains("telegram"));
    }

    #[test]
    fn signature_failure_maps_to_401() {
        let err = AppError::from(PlatformError::InvalidSignature);
        let (status, code, _) = err.parts();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "WEBHOOK_VERIFICATION_FAILED");
    }

    #[test]
    fn transmission_failure_maps_to_502() {
        let err = AppError::from(ResponderError::Transmission {
            source: PlatformError::Network("down".to_string()),
        });
        let (status, _, message) = err.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(message.contains("down"));
    }

    #[test]
    fn malformed_payload_maps_to_400() {
        let err = AppError::from(PlatformError::MalformedPayload("bad json".to_string()));
        let (status, _, _) = err.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

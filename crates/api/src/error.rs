use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use latchkey_core::bridge::BridgeError;
use latchkey_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`BridgeError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `latchkey_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The lock bridge could not be reached or answered badly.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidCommand(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_COMMAND", core.to_string())
                }
                CoreError::UnknownLocale(_) => {
                    (StatusCode::BAD_REQUEST, "UNKNOWN_LOCALE", core.to_string())
                }
                CoreError::MissingTranslationKey { .. } => {
                    tracing::error!(error = %core, "Translation lookup failed");
                    internal()
                }
            },

            // --- Bridge errors ---
            AppError::Bridge(err) => {
                let status = if err.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, bridge_code(err), err.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Stable error code for a bridge failure.
fn bridge_code(err: &BridgeError) -> &'static str {
    match err {
        BridgeError::Unavailable { .. } => "BRIDGE_UNAVAILABLE",
        BridgeError::Protocol { .. } => "BRIDGE_PROTOCOL_ERROR",
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

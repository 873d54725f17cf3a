use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use spinwin_core::error::CoreError;
use spinwin_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `spinwin_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A key-value store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

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
                CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::CooldownActive(denial) => {
                    let info = &denial.cooldown_info;
                    let body = json!({
                        "error": "Cooldown active",
                        "code": "COOLDOWN_ACTIVE",
                        "message": format!(
                            "You have already claimed your offer. Please wait {} before trying again",
                            info.display
                        ),
                        "cooldownActive": true,
                        "hoursLeft": info.hours_left(),
                        "cooldownInfo": info,
                        "existingOffer": denial.existing_offer,
                    });
                    return (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
                }
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found for {key}"),
                ),
                CoreError::Mismatch => (
                    StatusCode::BAD_REQUEST,
                    "CODE_MISMATCH",
                    "Invalid verification code".to_string(),
                ),
                CoreError::TransportFailure(msg) => {
                    tracing::error!(error = %msg, "Code delivery failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "DELIVERY_FAILED",
                        "Failed to send verification code".to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

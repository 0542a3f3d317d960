use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Every model candidate was exhausted on the analyze flow.
    /// Surfaced as 429 so the client knows to retry later.
    #[error("All model candidates exhausted")]
    ModelsExhausted,

    /// Generation failed after fallback. The message is already user-safe
    /// and is returned verbatim in the 500 body.
    #[error("{0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ModelsExhausted => (
                StatusCode::TOO_MANY_REQUESTS,
                "MODELS_EXHAUSTED",
                "All models are currently rate-limited. Please try again shortly.".to_string(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED", msg.clone())
            }
            AppError::Internal(e) => {
                // Full detail stays in the server log; the body gets a generic message.
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Something went wrong. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

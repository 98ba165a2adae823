use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::credentials::StoreError;

/// Every way a generation call can fail. Returned unmodified by all
/// assistant entry points; messages are meant to be shown to the end user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistantError {
    /// No credential is available. Raised before any network activity.
    #[error("{0}")]
    Configuration(String),

    /// Non-success status from the service, or the exchange itself failed.
    #[error("{0}")]
    RemoteService(String),

    /// Success status, but the body lacks the generated text.
    #[error("{0}")]
    MalformedResponse(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Assistant(AssistantError::Configuration(msg)) => (
                StatusCode::PRECONDITION_FAILED,
                "CREDENTIAL_MISSING",
                msg.clone(),
            ),
            AppError::Assistant(AssistantError::RemoteService(msg)) => {
                tracing::error!("Remote service error: {msg}");
                (StatusCode::BAD_GATEWAY, "REMOTE_SERVICE_ERROR", msg.clone())
            }
            AppError::Assistant(AssistantError::MalformedResponse(msg)) => {
                tracing::error!("Malformed response: {msg}");
                (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", msg.clone())
            }
            AppError::Store(e) => {
                tracing::error!("Credential store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "The credential could not be saved".to_string(),
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

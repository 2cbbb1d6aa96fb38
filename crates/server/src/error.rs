//! Wire-level API errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use platepilot_ai::AiError;
use platepilot_protocol::FieldError;

/// Errors a handler can answer with.
///
/// Provider failures are logged with their cause but answered with a
/// fixed opaque message; internals never leak to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation error")]
    Validation(Vec<FieldError>),

    #[error("malformed request body: {0}")]
    Malformed(String),

    #[error("failed to generate {what}")]
    Provider {
        what: &'static str,
        #[source]
        source: AiError,
    },
}

impl ApiError {
    pub(crate) fn provider(what: &'static str, source: AiError) -> Self {
        Self::Provider { what, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Validation error",
                    "details": details,
                })),
            )
                .into_response(),
            ApiError::Malformed(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Validation error",
                    "details": [{ "path": "body", "message": message }],
                })),
            )
                .into_response(),
            ApiError::Provider { what, source } => {
                tracing::error!(error = %source, "{what} generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": format!("Failed to generate {what}. Please try again."),
                    })),
                )
                    .into_response()
            }
        }
    }
}

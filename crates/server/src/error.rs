use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use docshelf_core::ValidationErrors;
use docshelf_store::StoreError;

/// Errors that can occur when running the docshelf server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A store failure surfaced through the API.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Request input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                let body = serde_json::json!({
                    "error": "validation failed",
                    "fields": errors.errors,
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            // Store and infrastructure detail goes to the log, never to the
            // caller.
            other => {
                tracing::error!(error = %other, "request failed");
                let body = serde_json::json!({ "error": "internal server error" });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}

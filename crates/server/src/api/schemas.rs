use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
}

/// Human-readable status message returned by the activation toggle.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// What happened to the document.
    #[schema(example = "Document activated successfully")]
    pub message: String,
}

/// Generic error response returned on failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    #[schema(example = "document not found: 42")]
    pub error: String,
}

/// Error response for rejected request bodies, with per-field detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Summary message.
    #[schema(example = "validation failed")]
    pub error: String,
    /// The individual field failures.
    pub fields: Vec<docshelf_core::FieldError>,
}

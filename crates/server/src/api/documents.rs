//! Document API endpoints.
//!
//! CRUD over the documents table plus the routine-backed operations:
//! filtered reads by type and user, and the activation toggle.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use docshelf_core::{Document, NewDocument, UpdateDocument};

use crate::error::ServerError;

use super::AppState;
use super::schemas::{ErrorResponse, StatusResponse};

fn not_found(id: i32) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!(ErrorResponse {
            error: format!("document not found: {id}"),
        })),
    )
}

/// `GET /documents` -- list all active documents, newest first.
#[utoipa::path(
    get,
    path = "/documents",
    tag = "Documents",
    summary = "List documents",
    description = "Lists all active documents, ordered by creation date descending.",
    responses(
        (status = 200, description = "List of active documents", body = Vec<Document>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let documents = state.store.list_active().await?;
    Ok((StatusCode::OK, Json(documents)))
}

/// `GET /documents/{id}` -- get a single active document.
#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "Documents",
    summary = "Get document",
    description = "Retrieves an active document by id. Soft-deleted documents are not found.",
    params(
        ("id" = i32, Path, description = "Document id"),
    ),
    responses(
        (status = 200, description = "The document", body = Document),
        (status = 404, description = "Document not found or inactive", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServerError> {
    match state.store.get(id).await? {
        Some(document) => Ok((StatusCode::OK, Json(serde_json::json!(document)))),
        None => Ok(not_found(id)),
    }
}

/// `POST /documents` -- create a document.
#[utoipa::path(
    post,
    path = "/documents",
    tag = "Documents",
    summary = "Create document",
    description = "Creates a document. The store assigns the id and creation timestamp; \
                   the response carries a Location header pointing at the new record.",
    request_body(content = NewDocument, description = "Document to create"),
    responses(
        (status = 201, description = "The created document", body = Document),
        (status = 400, description = "Validation failure", body = super::schemas::ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_document(
    State(state): State<AppState>,
    Json(input): Json<NewDocument>,
) -> Result<impl IntoResponse, ServerError> {
    input.validate()?;

    let document = state.store.create(input).await?;
    let location = format!("/documents/{}", document.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(document),
    ))
}

/// `PUT /documents/{id}` -- replace the mutable fields of a document.
#[utoipa::path(
    put,
    path = "/documents/{id}",
    tag = "Documents",
    summary = "Update document",
    description = "Replaces the mutable fields of an active document. Optional fields left \
                   out of the request become null on the record.",
    params(
        ("id" = i32, Path, description = "Document id"),
    ),
    request_body(content = UpdateDocument, description = "New field values"),
    responses(
        (status = 200, description = "The updated document", body = Document),
        (status = 400, description = "Validation failure", body = super::schemas::ValidationErrorResponse),
        (status = 404, description = "Document not found or inactive", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateDocument>,
) -> Result<impl IntoResponse, ServerError> {
    input.validate()?;

    match state.store.update(id, input).await? {
        Some(document) => Ok((StatusCode::OK, Json(serde_json::json!(document)))),
        None => Ok(not_found(id)),
    }
}

/// `DELETE /documents/{id}` -- soft-delete a document.
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "Documents",
    summary = "Delete document",
    description = "Soft-deletes a document: the record is marked inactive, not removed. \
                   Deleting an already-inactive document succeeds.",
    params(
        ("id" = i32, Path, description = "Document id"),
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServerError> {
    if state.store.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(not_found(id).into_response())
    }
}

/// `GET /documents/by-type/{document_type}` -- filtered read by type.
#[utoipa::path(
    get,
    path = "/documents/by-type/{document_type}",
    tag = "Documents",
    summary = "List documents by type",
    description = "Lists documents of the given type via the server-side filtered read. \
                   The list may be empty.",
    params(
        ("document_type" = String, Path, description = "Document type to filter by"),
    ),
    responses(
        (status = 200, description = "Matching documents", body = Vec<Document>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_documents_by_type(
    State(state): State<AppState>,
    Path(document_type): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let documents = state.store.list_by_type(&document_type).await?;
    Ok((StatusCode::OK, Json(documents)))
}

/// `GET /documents/by-user/{user_name}` -- filtered read by creator.
#[utoipa::path(
    get,
    path = "/documents/by-user/{user_name}",
    tag = "Documents",
    summary = "List documents by user",
    description = "Lists documents created by the given user via the server-side filtered read.",
    params(
        ("user_name" = String, Path, description = "Creator to filter by"),
    ),
    responses(
        (status = 200, description = "Matching documents", body = Vec<Document>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_documents_by_user(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let documents = state.store.list_by_user(&user_name).await?;
    Ok((StatusCode::OK, Json(documents)))
}

/// `PATCH /documents/{id}/status` -- activate or deactivate a document.
///
/// The body is a bare JSON boolean: the desired active state. Works on
/// soft-deleted documents as well as active ones.
#[utoipa::path(
    patch,
    path = "/documents/{id}/status",
    tag = "Documents",
    summary = "Set document status",
    description = "Sets the active flag through the server-side toggle routine. \
                   The request body is a bare boolean with the desired state.",
    params(
        ("id" = i32, Path, description = "Document id"),
    ),
    request_body(content = bool, description = "Desired active state"),
    responses(
        (status = 200, description = "Status changed", body = StatusResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_document_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(is_active): Json<bool>,
) -> Result<impl IntoResponse, ServerError> {
    if state.store.set_active(id, is_active).await? {
        let verb = if is_active { "activated" } else { "deactivated" };
        Ok((
            StatusCode::OK,
            Json(serde_json::json!(StatusResponse {
                message: format!("Document {verb} successfully"),
            })),
        ))
    } else {
        Ok(not_found(id))
    }
}

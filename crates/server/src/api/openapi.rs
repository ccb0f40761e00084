use docshelf_core::{Document, FieldError, NewDocument, UpdateDocument};

use super::schemas::{ErrorResponse, HealthResponse, StatusResponse, ValidationErrorResponse};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "docshelf API",
        version = "0.1.0",
        description = "CRUD HTTP API over the documents table, with filtered reads, \
                       activation toggling, and lesson code generation delegated to \
                       server-side routines.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Documents", description = "Document CRUD and routine-backed operations"),
        (name = "Lessons", description = "Sequential lesson code generation")
    ),
    paths(
        super::health::health,
        super::documents::list_documents,
        super::documents::get_document,
        super::documents::create_document,
        super::documents::update_document,
        super::documents::delete_document,
        super::documents::get_documents_by_type,
        super::documents::get_documents_by_user,
        super::documents::update_document_status,
        super::lessons::get_lesson_id,
    ),
    components(schemas(
        Document, NewDocument, UpdateDocument,
        HealthResponse, StatusResponse, ErrorResponse,
        ValidationErrorResponse, FieldError,
    ))
)]
pub struct ApiDoc;

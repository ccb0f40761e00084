pub mod documents;
pub mod health;
pub mod lessons;
pub mod openapi;
pub mod schemas;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use docshelf_store::DocumentStore;

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The document store backend.
    pub store: Arc<dyn DocumentStore>,
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Documents
        .route(
            "/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/documents/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route(
            "/documents/by-type/{document_type}",
            get(documents::get_documents_by_type),
        )
        .route(
            "/documents/by-user/{user_name}",
            get(documents::get_documents_by_user),
        )
        .route(
            "/documents/{id}/status",
            patch(documents::update_document_status),
        )
        // Lessons
        .route("/lessons/GetLessonID", get(lessons::get_lesson_id))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

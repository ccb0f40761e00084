//! Lesson code endpoint.
//!
//! Thin front over the `get_next_category_code` procedure: category in,
//! freshly minted sequential code out.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::error::ServerError;

use super::AppState;
use super::schemas::ErrorResponse;

/// Query parameters for the lesson code endpoint.
#[derive(Debug, Deserialize)]
pub struct LessonQuery {
    /// Category to mint a code for.
    pub category: Option<String>,
}

/// `GET /lessons/GetLessonID?category=` -- mint the next lesson code.
#[utoipa::path(
    get,
    path = "/lessons/GetLessonID",
    tag = "Lessons",
    summary = "Next lesson code",
    description = "Mints the next sequential lesson code for a category. A blank or \
                   missing category is rejected before the store is touched.",
    params(
        ("category" = String, Query, description = "Category to mint a code for"),
    ),
    responses(
        (status = 200, description = "The minted code", body = String),
        (status = 400, description = "Blank or missing category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_lesson_id(
    State(state): State<AppState>,
    Query(query): Query<LessonQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let category = query.category.as_deref().unwrap_or("");
    if category.trim().is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!(ErrorResponse {
                error: "category parameter is required and cannot be empty".into(),
            })),
        ));
    }

    let code = state.store.next_lesson_code(category).await?;
    Ok((StatusCode::OK, Json(serde_json::json!(code))))
}

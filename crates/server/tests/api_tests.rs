use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use tower::ServiceExt;

use docshelf_server::api::{AppState, router};
use docshelf_store_memory::MemoryDocumentStore;

// -- Helpers --------------------------------------------------------------

fn build_app() -> axum::Router {
    let store = Arc::new(MemoryDocumentStore::new());
    router(AppState { store })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: http::Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn create_body(title: &str, document_type: &str, created_by: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "documentType": document_type,
        "createdBy": created_by,
    })
}

/// Create a document and return its JSON body.
async fn create_document(app: &axum::Router, body: &serde_json::Value) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request(http::Method::POST, "/documents", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

// -- Health ---------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let app = build_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
}

// -- Create ---------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_location_and_populated_record() {
    let app = build_app();

    let response = app
        .clone()
        .oneshot(json_request(
            http::Method::POST,
            "/documents",
            &create_body("A", "Spec", "alice"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(http::header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_owned();

    let json = read_json(response).await;
    let id = json["id"].as_i64().expect("generated id");
    assert_eq!(location, format!("/documents/{id}"));
    assert_eq!(json["title"], "A");
    assert_eq!(json["documentType"], "Spec");
    assert_eq!(json["createdBy"], "alice");
    assert_eq!(json["isActive"], true);
    assert!(json["createdDate"].is_string(), "createdDate is set");
    assert!(json["modifiedDate"].is_null());
    assert!(json["description"].is_null());

    // The Location header resolves to the created record.
    let response = app.oneshot(get(&location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_ids_are_unique() {
    let app = build_app();

    let first = create_document(&app, &create_body("one", "Spec", "alice")).await;
    let second = create_document(&app, &create_body("two", "Spec", "alice")).await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn create_rejects_invalid_input_with_field_detail() {
    let app = build_app();

    let body = serde_json::json!({
        "title": "   ",
        "documentType": "Spec",
        "createdBy": "x".repeat(101),
    });
    let response = app
        .oneshot(json_request(http::Method::POST, "/documents", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "createdBy"]);
}

// -- Get ------------------------------------------------------------------

#[tokio::test]
async fn get_missing_document_returns_404() {
    let app = build_app();

    let response = app.oneshot(get("/documents/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = read_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn get_soft_deleted_document_returns_404() {
    let app = build_app();
    let created = create_document(&app, &create_body("doomed", "Spec", "alice")).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(http::Method::DELETE)
                .uri(format!("/documents/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get(&format!("/documents/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- List -----------------------------------------------------------------

#[tokio::test]
async fn list_excludes_inactive_and_sorts_newest_first() {
    let app = build_app();

    let first = create_document(&app, &create_body("first", "Spec", "alice")).await;
    let second = create_document(&app, &create_body("second", "Spec", "alice")).await;
    let doomed = create_document(&app, &create_body("doomed", "Spec", "alice")).await;

    let doomed_id = doomed["id"].as_i64().unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .method(http::Method::DELETE)
                .uri(format!("/documents/{doomed_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app.oneshot(get("/documents")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    // Newest first: "second" was created after "first".
    assert_eq!(listed[0]["id"], second["id"]);
    assert_eq!(listed[1]["id"], first["id"]);
    assert!(listed.iter().all(|d| d["isActive"] == true));
}

// -- Update ---------------------------------------------------------------

#[tokio::test]
async fn update_replaces_all_mutable_fields() {
    let app = build_app();

    let created = create_document(
        &app,
        &serde_json::json!({
            "title": "original",
            "description": "original description",
            "documentType": "Spec",
            "createdBy": "alice",
            "filePath": "/files/original.pdf",
            "fileSize": 1024,
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // description/filePath/fileSize omitted: full replace nulls them.
    let response = app
        .clone()
        .oneshot(json_request(
            http::Method::PUT,
            &format!("/documents/{id}"),
            &serde_json::json!({
                "title": "revised",
                "documentType": "Plan",
                "modifiedBy": "bob",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["title"], "revised");
    assert_eq!(json["documentType"], "Plan");
    assert_eq!(json["modifiedBy"], "bob");
    assert!(json["description"].is_null());
    assert!(json["filePath"].is_null());
    assert!(json["fileSize"].is_null());
    assert!(json["modifiedDate"].is_string());
    assert_eq!(json["createdDate"], created["createdDate"]);
    assert_eq!(json["createdBy"], "alice");
}

#[tokio::test]
async fn update_missing_or_inactive_returns_404() {
    let app = build_app();

    let body = serde_json::json!({
        "title": "ghost",
        "documentType": "Spec",
        "modifiedBy": "bob",
    });
    let response = app
        .clone()
        .oneshot(json_request(http::Method::PUT, "/documents/999", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let created = create_document(&app, &create_body("gone", "Spec", "alice")).await;
    let id = created["id"].as_i64().unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .method(http::Method::DELETE)
                .uri(format!("/documents/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            http::Method::PUT,
            &format!("/documents/{id}"),
            &body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rejects_blank_modified_by() {
    let app = build_app();
    let created = create_document(&app, &create_body("kept", "Spec", "alice")).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .oneshot(json_request(
            http::Method::PUT,
            &format!("/documents/{id}"),
            &serde_json::json!({
                "title": "revised",
                "documentType": "Spec",
                "modifiedBy": "  ",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert_eq!(json["fields"][0]["field"], "modifiedBy");
}

// -- Delete ---------------------------------------------------------------

#[tokio::test]
async fn delete_missing_document_returns_404() {
    let app = build_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(http::Method::DELETE)
                .uri("/documents/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent_at_the_flag_level() {
    let app = build_app();
    let created = create_document(&app, &create_body("twice", "Spec", "alice")).await;
    let id = created["id"].as_i64().unwrap();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(http::Method::DELETE)
                    .uri(format!("/documents/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

// -- Filtered reads -------------------------------------------------------

#[tokio::test]
async fn by_type_returns_only_matching_documents() {
    let app = build_app();

    create_document(&app, &create_body("spec-doc", "Spec", "alice")).await;
    create_document(&app, &create_body("plan-doc", "Plan", "alice")).await;

    let response = app.clone().oneshot(get("/documents/by-type/Spec")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["documentType"], "Spec");

    // An unknown type yields an empty list, not an error.
    let response = app.oneshot(get("/documents/by-type/Unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn by_user_returns_only_that_users_documents() {
    let app = build_app();

    create_document(&app, &create_body("a-doc", "Spec", "alice")).await;
    create_document(&app, &create_body("b-doc", "Spec", "bob")).await;

    let response = app.oneshot(get("/documents/by-user/bob")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["createdBy"], "bob");
}

// -- Status toggle --------------------------------------------------------

#[tokio::test]
async fn status_toggle_on_missing_document_returns_404() {
    let app = build_app();

    let response = app
        .oneshot(json_request(
            http::Method::PATCH,
            "/documents/999/status",
            &serde_json::json!(true),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_toggle_reactivates_a_soft_deleted_document() {
    let app = build_app();
    let created = create_document(&app, &create_body("phoenix", "Spec", "alice")).await;
    let id = created["id"].as_i64().unwrap();

    app.clone()
        .oneshot(
            Request::builder()
                .method(http::Method::DELETE)
                .uri(format!("/documents/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The toggle addresses the record even though it is soft-deleted.
    let response = app
        .clone()
        .oneshot(json_request(
            http::Method::PATCH,
            &format!("/documents/{id}/status"),
            &serde_json::json!(true),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["message"], "Document activated successfully");

    let response = app.oneshot(get(&format!("/documents/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn status_toggle_deactivates_an_active_document() {
    let app = build_app();
    let created = create_document(&app, &create_body("hidden", "Spec", "alice")).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            http::Method::PATCH,
            &format!("/documents/{id}/status"),
            &serde_json::json!(false),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["message"], "Document deactivated successfully");

    let response = app.oneshot(get(&format!("/documents/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Lesson codes ---------------------------------------------------------

#[tokio::test]
async fn lesson_codes_are_sequential_per_category() {
    let app = build_app();

    let response = app
        .clone()
        .oneshot(get("/lessons/GetLessonID?category=Math"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, "Math-0001");

    let response = app
        .clone()
        .oneshot(get("/lessons/GetLessonID?category=Math"))
        .await
        .unwrap();
    assert_eq!(read_json(response).await, "Math-0002");

    let response = app
        .oneshot(get("/lessons/GetLessonID?category=History"))
        .await
        .unwrap();
    assert_eq!(read_json(response).await, "History-0001");
}

#[tokio::test]
async fn lesson_code_rejects_blank_category() {
    let app = build_app();

    for uri in [
        "/lessons/GetLessonID",
        "/lessons/GetLessonID?category=",
        "/lessons/GetLessonID?category=%20%20",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let json = read_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("category"));
    }
}

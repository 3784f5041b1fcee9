use axum::body::Body;
use axum::http::{Request, StatusCode};
use rusty_library_lending::api::handlers::AppState;
use rusty_library_lending::api::router::create_router;
use rusty_library_lending::api::types::*;
use rusty_library_lending::application::library::ServiceDependencies;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// APIテスト用のヘルパー関数
// ============================================================================

/// インメモリストアでルーターを組み立てる
fn setup_app() -> axum::Router {
    app_with(common::memory_deps())
}

fn app_with(service_deps: ServiceDependencies) -> axum::Router {
    create_router(Arc::new(AppState { service_deps }))
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let body = body.map(|body| serde_json::to_string(&body).unwrap());
    send_raw(app, method, uri, body).await
}

/// 本文を文字列のまま送る（不正なJSONの送信用）
async fn send_raw(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body.to_vec())
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

/// カテゴリ・利用者・書籍を1件ずつ登録し、それぞれのIDを返す
async fn seed(app: &axum::Router) -> (i64, i64, i64) {
    let (status, body) = send(app, "POST", "/categories", Some(json!({ "name": "Novela" }))).await;
    assert_eq!(status, StatusCode::OK);
    let category_id = parse::<CreatedResponse>(&body).id;

    let (status, body) = send(
        app,
        "POST",
        "/persons",
        Some(json!({
            "firstName": "Julio",
            "lastName": "Cortázar",
            "alias": "cronopio",
            "email": "cronopio@example.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let person_id = parse::<CreatedResponse>(&body).id;

    let (status, body) = send(
        app,
        "POST",
        "/books",
        Some(json!({
            "title": "Rayuela",
            "description": "Novela",
            "categoryId": category_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let book_id = parse::<CreatedResponse>(&body).id;

    (category_id, person_id, book_id)
}

// ============================================================================
// 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_lend_return_delete_flow() {
    let app = setup_app();
    let (category_id, person_id, book_id) = seed(&app).await;

    // 登録直後は貸出可能
    let (status, body) = send(&app, "GET", &format!("/books/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let book: BookResponse = parse(&body);
    assert_eq!(book.category_id, category_id);
    assert_eq!(book.person_id, 0);
    assert_eq!(book.state, "available");

    // 貸出
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/prestar/{}", book_id),
        Some(json!({ "personId": person_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let book: BookResponse = parse(&body);
    assert_eq!(book.person_id, person_id);
    assert_eq!(book.state, "lent");

    // 貸出中は削除できない
    let (status, body) = send(&app, "DELETE", &format!("/books/{}", book_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(parse::<ErrorResponse>(&body).error, "CURRENTLY_LENT");

    // 返却
    let (status, body) = send(&app, "PUT", &format!("/books/devolver/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let book: BookResponse = parse(&body);
    assert_eq!(book.person_id, 0);
    assert_eq!(book.state, "available");

    // 削除
    let (status, body) = send(&app, "DELETE", &format!("/books/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: DeletedResponse = parse(&body);
    assert_eq!(deleted.id, book_id);
    assert!(deleted.deleted);

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(parse::<Vec<BookResponse>>(&body).is_empty());
}

#[tokio::test]
async fn test_update_book_description() {
    let app = setup_app();
    let (_, _, book_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/{}", book_id),
        Some(json!({ "description": "Contranovela" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let book: BookResponse = parse(&body);
    assert_eq!(book.description, "Contranovela");
    assert_eq!(book.title, "Rayuela");
}

// ============================================================================
// 異常系: エラー種別とステータスコード
// ============================================================================

#[tokio::test]
async fn test_lend_twice_returns_conflict() {
    let app = setup_app();
    let (_, person_id, book_id) = seed(&app).await;
    let uri = format!("/books/prestar/{}", book_id);

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "personId": person_id }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "personId": person_id }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "ALREADY_LENT");
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn test_lend_missing_book_returns_not_found() {
    let app = setup_app();
    let (_, person_id, _) = seed(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/books/prestar/999",
        Some(json!({ "personId": person_id })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse::<ErrorResponse>(&body).error, "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn test_lend_to_missing_person_returns_not_found() {
    let app = setup_app();
    let (_, _, book_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/prestar/{}", book_id),
        Some(json!({ "personId": 77 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse::<ErrorResponse>(&body).error, "PERSON_NOT_FOUND");
}

#[tokio::test]
async fn test_return_available_book_returns_conflict() {
    let app = setup_app();
    let (_, _, book_id) = seed(&app).await;

    let (status, body) = send(&app, "PUT", &format!("/books/devolver/{}", book_id), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(parse::<ErrorResponse>(&body).error, "NOT_LENT");
}

#[tokio::test]
async fn test_create_book_with_missing_field_returns_unprocessable() {
    let app = setup_app();
    let (category_id, _, _) = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "title": "Sin descripción", "categoryId": category_id })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse::<ErrorResponse>(&body).error, "MISSING_FIELD");
}

#[tokio::test]
async fn test_create_book_with_unknown_category_returns_unprocessable() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "title": "Rayuela", "description": "Novela", "categoryId": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse::<ErrorResponse>(&body).error, "UNKNOWN_REFERENCE");
}

#[tokio::test]
async fn test_update_person_with_email_returns_unprocessable() {
    let app = setup_app();
    let (_, person_id, _) = seed(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/persons/{}", person_id),
        Some(json!({
            "firstName": "Julio",
            "lastName": "Cortázar",
            "alias": "cronopio",
            "email": "otro@example.com",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse::<ErrorResponse>(&body).error, "EMAIL_IMMUTABLE");

    let (_, body) = send(&app, "GET", &format!("/persons/{}", person_id), None).await;
    assert_eq!(parse::<PersonResponse>(&body).email, "cronopio@example.com");
}

#[tokio::test]
async fn test_delete_person_with_books_returns_conflict() {
    let app = setup_app();
    let (_, person_id, book_id) = seed(&app).await;
    send(
        &app,
        "PUT",
        &format!("/books/prestar/{}", book_id),
        Some(json!({ "personId": person_id })),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/persons/{}", person_id), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(parse::<ErrorResponse>(&body).error, "HAS_ASSOCIATED_BOOKS");
}

#[tokio::test]
async fn test_duplicate_email_returns_conflict() {
    let app = setup_app();
    seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/persons",
        Some(json!({
            "firstName": "Otro",
            "lastName": "Lector",
            "alias": "otro",
            "email": "cronopio@example.com",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(parse::<ErrorResponse>(&body).error, "EMAIL_ALREADY_REGISTERED");
}

#[tokio::test]
async fn test_get_missing_category_returns_not_found() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/categories/3", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse::<ErrorResponse>(&body).error, "CATEGORY_NOT_FOUND");
}

// ============================================================================
// 異常系: 解釈できないリクエスト
// ============================================================================

#[tokio::test]
async fn test_lend_with_non_numeric_person_id_returns_invalid_input() {
    let app = setup_app();
    let (_, _, book_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/prestar/{}", book_id),
        Some(json!({ "personId": "abc" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "INVALID_INPUT");
    assert!(!error.message.is_empty());

    // 書籍は貸出可能のまま
    let (_, body) = send(&app, "GET", &format!("/books/{}", book_id), None).await;
    assert_eq!(parse::<BookResponse>(&body).person_id, 0);
}

#[tokio::test]
async fn test_non_numeric_path_id_returns_invalid_input() {
    let app = setup_app();

    for (method, uri) in [
        ("GET", "/books/abc"),
        ("PUT", "/books/devolver/abc"),
        ("DELETE", "/persons/abc"),
        ("GET", "/categories/abc"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{} {}", method, uri);
        assert_eq!(parse::<ErrorResponse>(&body).error, "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_malformed_json_body_returns_invalid_input() {
    let app = setup_app();

    let (status, body) = send_raw(&app, "POST", "/persons", Some("not json".to_string())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "INVALID_INPUT");

    let (_, body) = send(&app, "GET", "/persons", None).await;
    assert!(parse::<Vec<PersonResponse>>(&body).is_empty());
}

// ============================================================================
// 異常系: ストア障害
// ============================================================================

#[tokio::test]
async fn test_store_failure_returns_unexpected_error_without_details() {
    let app = app_with(common::failing_book_deps());

    for (method, uri) in [("GET", "/books"), ("GET", "/books/1"), ("DELETE", "/books/1")] {
        let (status, body) = send(&app, method, uri, None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        let error: ErrorResponse = parse(&body);
        assert_eq!(error.error, "UNEXPECTED_ERROR");
        assert!(!error.message.is_empty());

        let text = String::from_utf8(body).unwrap();
        assert!(!text.contains(common::STORE_FAILURE));
        assert!(!text.contains("db-internal"));
    }
}

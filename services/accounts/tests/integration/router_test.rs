use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use elevate_accounts::infra::notifier::EmailNotifier;
use elevate_accounts::router::build_router;
use elevate_accounts::state::AppState;

/// Server without a database: only paths that fail before touching storage
/// give meaningful answers.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        notifier: EmailNotifier::Disabled,
        delivery_timeout: Duration::from_millis(100),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn healthz_answers_with_request_id() {
    let response = server().get("/healthz").await;

    response.assert_status_ok();
    let id = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn healthz_keeps_caller_request_id() {
    let response = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-me"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "trace-me");
}

#[tokio::test]
async fn readyz_is_unavailable_without_database() {
    let response = server().get("/readyz").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["kind"], "UNAVAILABLE");
}

#[tokio::test]
async fn request_code_rejects_malformed_email() {
    let response = server()
        .post("/user/reset-password-otp")
        .json(&json!({ "email": "not-an-email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "email");
}

#[tokio::test]
async fn reset_password_rejects_non_numeric_code() {
    let response = server()
        .post("/user/reset-password")
        .json(&json!({
            "email": "alice@example.com",
            "code": "abc123",
            "new_password": "NewPass1",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "code");
}

#[tokio::test]
async fn reset_password_rejects_short_password() {
    let response = server()
        .post("/user/reset-password")
        .json(&json!({
            "email": "alice@example.com",
            "code": "123456",
            "new_password": "abc",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "new_password");
}

#[tokio::test]
async fn change_password_requires_identity_header() {
    let response = server()
        .patch("/user/change-password")
        .json(&json!({ "old_password": "OldPass1", "new_password": "NewPass1" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn change_password_validates_before_lookup() {
    let response = server()
        .patch("/user/change-password")
        .add_header(
            HeaderName::from_static("x-elevate-account-id"),
            HeaderValue::from_static("00000000-0000-0000-0000-000000000001"),
        )
        .json(&json!({ "old_password": "", "new_password": "NewPass1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "old_password");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let response = server().get("/user/unknown").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "NOT_FOUND");
}

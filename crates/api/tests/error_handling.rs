//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;
use taskory_api::error::AppError;
use taskory_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Project",
        id: "p42".to_string(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with id p42 not found");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Task id not found.".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Task id not found.");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Unauthorized maps to 401 with the auth-sync redirect
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401_with_redirect() {
    let err = AppError::Core(CoreError::Unauthorized("Missing session token".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing session token");
    assert_eq!(json["redirect"], "/auth-sync");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Forbidden maps to 403, without a redirect
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forbidden_error_returns_403() {
    let err = AppError::Core(CoreError::Forbidden(
        "You do not have access to this project".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
    assert!(json.get("redirect").is_none());
}

// ---------------------------------------------------------------------------
// Test: AppError::Backend maps to 500 and keeps its fixed message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backend_error_returns_500_with_its_message() {
    let err = AppError::Backend("Error getting inbox tasks".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "BACKEND_ERROR");
    assert_eq!(json["error"], "Error getting inbox tasks");
}

// ---------------------------------------------------------------------------
// Test: internal errors are sanitized before leaving the server
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_message_is_sanitized() {
    let err = AppError::InternalError("secret connection string leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Internal is sanitized the same way
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_internal_error_is_sanitized() {
    let err = AppError::Core(CoreError::Internal("store client panicked".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

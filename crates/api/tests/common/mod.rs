//! Shared helpers for API integration tests.
//!
//! Tests run against the real router and middleware stack, with the
//! hosted document store swapped for [`MemoryStore`] and the Gemini
//! generator for [`MockTaskGenerator`].

// Each test binary compiles this module separately and uses a subset.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use taskory_api::config::ServerConfig;
use taskory_api::router::build_app_router;
use taskory_api::session::{issue_token, SessionConfig};
use taskory_api::state::AppState;
use taskory_genai::MockTaskGenerator;
use taskory_store::MemoryStore;

/// Session secret every test app signs tokens with.
const TEST_SESSION_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: TEST_SESSION_SECRET.to_string(),
            ttl_days: 30,
        },
    }
}

/// Build the full application router over the given store, with a
/// generator that never returns drafts.
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with_generator(store, Arc::new(MockTaskGenerator::empty()))
}

/// Build the full application router with a scripted generator.
pub fn build_test_app_with_generator(
    store: Arc<MemoryStore>,
    generator: Arc<MockTaskGenerator>,
) -> Router {
    let config = test_config();
    let state = AppState {
        store: store.clone(),
        generator,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a session token for the given user against the test secret.
pub fn session_token(user_id: &str) -> String {
    issue_token(user_id, &test_config().session).expect("token issuing should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET without a session.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with a bearer session token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body without a session.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body, None).await
}

/// POST a JSON body with a bearer session token.
pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send_json(app, Method::POST, uri, body, Some(token)).await
}

/// PUT a JSON body with a bearer session token.
pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send_json(app, Method::PUT, uri, body, Some(token)).await
}

/// DELETE with a JSON body and a bearer session token.
pub async fn delete_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send_json(app, Method::DELETE, uri, body, Some(token)).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

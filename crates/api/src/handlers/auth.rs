//! Handlers for the `/auth` resource (session issue and teardown).
//!
//! Identity itself lives with the external provider the client signs in
//! against; these endpoints only exchange a verified provider user id for
//! a session token scoped to this API.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskory_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::session::{clear_session_cookie, issue_token, session_cookie};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/session`.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: String,
}

/// Successful session response. The token is also set as an HttpOnly
/// cookie so browser clients need not store it themselves.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/session
///
/// Issue a session token for the given provider user id. Returns the
/// token as JSON and as the session cookie.
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSessionRequest>,
) -> AppResult<([(HeaderName, String); 1], Json<SessionResponse>)> {
    let user_id = input.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "user_id must not be empty".into(),
        )));
    }

    let token = issue_token(user_id, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Failed to issue session token: {e}")))?;
    let cookie = session_cookie(&token, &state.config.session);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            token,
            expires_in: state.config.session.ttl_secs(),
        }),
    ))
}

/// DELETE /api/v1/auth/session
///
/// Clear the session cookie. The token itself stays valid until expiry;
/// clients drop their copy.
pub async fn delete_session() -> (StatusCode, [(HeaderName, String); 1]) {
    (StatusCode::NO_CONTENT, [(SET_COOKIE, clear_session_cookie())])
}

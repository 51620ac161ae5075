//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /session  -> create_session
/// DELETE /session  -> delete_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/session",
        post(auth::create_session).delete(auth::delete_session),
    )
}

//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use taskory_core::error::CoreError;
use taskory_core::types::UserId;

use crate::error::AppError;
use crate::session::{verify_token, SESSION_COOKIE};
use crate::state::AppState;

/// Authenticated user resolved from the request's session token.
///
/// Accepts either `Authorization: Bearer <token>` or the session cookie;
/// the header wins when both are present. Use this as an extractor
/// parameter in any handler that requires a session:
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The external identity provider's user id (from `claims.sub`).
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .or_else(|| cookie_token(&parts.headers))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing session token".into()))
            })?;

        let claims = verify_token(&token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired session token".into(),
            ))
        })?;

        Ok(CurrentUser {
            user_id: claims.sub,
        })
    }
}

/// Token from an `Authorization: Bearer <token>` header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Token from the session cookie, if present.
fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskory_core::error::CoreError;

/// Client-side route the auth-sync flow lives at. 401 responses carry it
/// so the view layer knows where to send the user.
pub const AUTH_SYNC_PATH: &str = "/auth-sync";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taskory_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A backend (document store) failure already logged at the call site,
    /// carrying the fixed operation-level message the client renders.
    #[error("{0}")]
    Backend(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Log a backend failure once at the call site and convert it to the
    /// coarse, fixed-message error the handler returns.
    pub fn backend(message: impl Into<String>, err: impl std::fmt::Display) -> Self {
        let message = message.into();
        tracing::error!(error = %err, "{message}");
        Self::Backend(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Backend errors (already logged where they happened) ---
            AppError::Backend(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "BACKEND_ERROR", msg.clone()),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });

        // 401 bodies point the client at the auth-sync flow.
        if status == StatusCode::UNAUTHORIZED {
            body["redirect"] = json!(AUTH_SYNC_PATH);
        }

        (status, axum::Json(body)).into_response()
    }
}

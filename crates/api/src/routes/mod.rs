pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/session              issue session (POST), clear session (DELETE)
///
/// /summary                   sidebar projects + inbox/today counts (GET)
///
/// /tasks?view={name}         list tasks for a named view (GET)
/// /tasks                     create, update, delete (POST, PUT, DELETE)
///
/// /projects                  create, update, delete (POST, PUT, DELETE)
/// /projects/search?q={term}  project name search (GET)
/// /projects/{id}             project detail with its open tasks (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Session issue / teardown for the auth-sync flow.
        .nest("/auth", auth::router())
        // Task views and mutations.
        .nest("/tasks", tasks::router())
        // Project CRUD, search, and detail.
        .nest("/projects", projects::router())
        // App summary consumed by the sidebar on every app load.
        .route("/summary", get(handlers::summary::get_summary))
}

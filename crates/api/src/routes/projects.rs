//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`. Like tasks, mutations carry the
/// project id in the request body.
///
/// ```text
/// POST   /           -> create (redirects to the new project)
/// PUT    /           -> update
/// DELETE /           -> delete (cascades to the project's tasks)
/// GET    /search     -> search (?q={term})
/// GET    /{id}       -> detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(projects::create)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/search", get(projects::search))
        .route("/{id}", get(projects::detail))
}

//! Route definitions for the `/tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`. Mutations address the task by an id in
/// the request body rather than the path.
///
/// ```text
/// GET    /?view={name}  -> list
/// POST   /              -> create
/// PUT    /              -> update
/// DELETE /              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(tasks::list)
            .post(tasks::create)
            .put(tasks::update)
            .delete(tasks::delete),
    )
}

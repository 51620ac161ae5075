//! Handler for the app summary consumed on every app shell load.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use taskory_core::views::TaskView;
use taskory_store::models::ProjectSummary;
use taskory_store::repositories::{ProjectRepo, TaskRepo};
use taskory_store::DocumentList;

use crate::error::{AppError, AppResult};
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Badge counts rendered next to the sidebar's view links.
#[derive(Debug, Serialize)]
pub struct TaskCounts {
    pub inbox: usize,
    pub today: usize,
}

/// Response body for `GET /summary`: everything the navigation sidebar
/// needs in one request.
#[derive(Debug, Serialize)]
pub struct AppSummary {
    pub projects: DocumentList<ProjectSummary>,
    pub task_counts: TaskCounts,
}

/// GET /api/v1/summary
pub async fn get_summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<AppSummary>> {
    let store = state.store.as_ref();

    let projects = ProjectRepo::list_summaries(store, &user.user_id)
        .await
        .map_err(|err| AppError::backend("Error getting projects", err))?;

    let inbox = TaskRepo::count(store, &TaskView::Inbox, &user.user_id)
        .await
        .map_err(|err| AppError::backend("Error getting inbox task counts", err))?;
    let today = TaskRepo::count(store, &TaskView::Today, &user.user_id)
        .await
        .map_err(|err| AppError::backend("Error getting today task counts", err))?;

    Ok(Json(AppSummary {
        projects,
        task_counts: TaskCounts { inbox, today },
    }))
}

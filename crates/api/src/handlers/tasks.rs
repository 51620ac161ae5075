//! Handlers for the `/tasks` resource.
//!
//! Task mutations address the document by an id carried in the request
//! body, mirroring how the client's task forms submit. Every access is
//! scoped to the session user.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskory_core::error::CoreError;
use taskory_core::task::validate_task_content;
use taskory_core::types::DocumentId;
use taskory_core::views::TaskView;
use taskory_store::models::{CreateTask, Task, UpdateTask};
use taskory_store::repositories::TaskRepo;
use taskory_store::DocumentList;

use crate::error::{AppError, AppResult};
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Query parameters for `GET /tasks`.
#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    /// One of the named views: `inbox`, `today`, `upcoming`, `completed`.
    #[serde(default)]
    pub view: Option<String>,
}

/// Request body for `DELETE /tasks`.
#[derive(Debug, Deserialize)]
pub struct DeleteTaskRequest {
    #[serde(default)]
    pub id: Option<DocumentId>,
}

/// GET /api/v1/tasks?view={name}
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<ListTasksParams>,
) -> AppResult<Json<DocumentList<Task>>> {
    let view = TaskView::from_name(params.view.as_deref().unwrap_or_default())?;

    let tasks = TaskRepo::list(state.store.as_ref(), &view, &user.user_id)
        .await
        .map_err(|err| {
            AppError::backend(format!("Error getting {} tasks", view.as_str()), err)
        })?;
    Ok(Json(tasks))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    validate_task_content(&input.content)?;

    let task = TaskRepo::create(state.store.as_ref(), &input, &user.user_id)
        .await
        .map_err(|err| AppError::backend("Error creating task", err))?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/v1/tasks
///
/// The task id rides in the body; the remaining fields are applied as a
/// partial update.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let Some(id) = input.id.clone().filter(|id| !id.is_empty()) else {
        return Err(AppError::Core(CoreError::Validation(
            "Task id not found.".into(),
        )));
    };

    check_task_owner(&state, &id, &user).await?;

    let task = TaskRepo::update(state.store.as_ref(), &id, &input)
        .await
        .map_err(|err| AppError::backend("Error updating task", err))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<DeleteTaskRequest>,
) -> AppResult<StatusCode> {
    let Some(id) = input.id.filter(|id| !id.is_empty()) else {
        return Err(AppError::Core(CoreError::Validation(
            "Task id not found.".into(),
        )));
    };

    check_task_owner(&state, &id, &user).await?;

    let deleted = TaskRepo::delete(state.store.as_ref(), &id)
        .await
        .map_err(|err| AppError::backend("Error deleting task", err))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}

/// Ensure the task exists and belongs to the session user before a
/// mutation touches it.
async fn check_task_owner(state: &AppState, id: &str, user: &CurrentUser) -> AppResult<()> {
    let task = TaskRepo::find_by_id(state.store.as_ref(), id)
        .await
        .map_err(|err| AppError::backend("Error getting task", err))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: id.to_string(),
        }))?;

    if task.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this task".into(),
        )));
    }
    Ok(())
}

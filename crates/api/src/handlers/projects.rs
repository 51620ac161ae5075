//! Handlers for the `/projects` resource.
//!
//! Project creation is the entry point for AI task generation: when the
//! client opts in, drafts come back from the generator and are inserted
//! as the project's starter tasks before the client is redirected to the
//! new project's page.

use std::cmp::Ordering;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use taskory_core::error::CoreError;
use taskory_core::project::validate_project_fields;
use taskory_core::types::DocumentId;
use taskory_core::views::TaskView;
use taskory_genai::TaskDraft;
use taskory_store::models::{
    CreateProject, CreateTask, Project, ProjectSummary, Task, UpdateProject,
};
use taskory_store::repositories::{ProjectRepo, TaskRepo};
use taskory_store::{DocumentList, DocumentStore};

use crate::error::{AppError, AppResult};
use crate::extract::CurrentUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(flatten)]
    pub project: CreateProject,
    /// When set, starter tasks are generated from `task_gen_prompt`.
    #[serde(default)]
    pub ai_task_gen: bool,
    #[serde(default)]
    pub task_gen_prompt: String,
}

/// Request body for `DELETE /projects`.
#[derive(Debug, Deserialize)]
pub struct DeleteProjectRequest {
    #[serde(default)]
    pub id: Option<DocumentId>,
}

/// Query parameters for `GET /projects/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Name fragment to match; empty matches every project.
    #[serde(default)]
    pub q: String,
}

/// Response body for `GET /projects/{id}`.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    /// The project's open tasks, soonest due date first, undated last.
    pub tasks: Vec<Task>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}
pub async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DocumentId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = find_owned_project(&state, &id, &user).await?;

    let list = TaskRepo::list(state.store.as_ref(), &TaskView::Project(id), &user.user_id)
        .await
        .map_err(|err| AppError::backend("Error getting project tasks", err))?;

    let mut tasks: Vec<Task> = list
        .documents
        .into_iter()
        .filter(|task| !task.completed)
        .collect();
    sort_by_due_date(&mut tasks);

    Ok(Json(ProjectDetail { project, tasks }))
}

/// GET /api/v1/projects/search?q={term}
pub async fn search(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DocumentList<ProjectSummary>>> {
    let projects = ProjectRepo::search(state.store.as_ref(), &params.q, &user.user_id)
        .await
        .map_err(|err| AppError::backend("Error getting projects", err))?;
    Ok(Json(projects))
}

/// POST /api/v1/projects
///
/// Creates the project, optionally inserts AI-generated starter tasks,
/// then redirects (303) to the new project's app page.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<Redirect> {
    validate_project_fields(
        &input.project.name,
        &input.project.color_name,
        &input.project.color_hex,
    )?;

    let project = ProjectRepo::create(state.store.as_ref(), &input.project, &user.user_id)
        .await
        .map_err(|err| AppError::backend("Error creating project", err))?;

    if input.ai_task_gen {
        // The generator degrades to no drafts on failure, so the project
        // itself is never rolled back on the AI path.
        let drafts = state.generator.generate_tasks(&input.task_gen_prompt).await;
        create_draft_tasks(state.store.as_ref(), &project.id, &user.user_id, drafts).await;
    }

    Ok(Redirect::to(&format!("/app/projects/{}", project.id)))
}

/// PUT /api/v1/projects
///
/// The project id rides in the body; name and both color fields are
/// rewritten as a unit.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let Some(id) = input.id.clone().filter(|id| !id.is_empty()) else {
        return Err(AppError::Core(CoreError::Validation(
            "Project id not found.".into(),
        )));
    };
    validate_project_fields(&input.name, &input.color_name, &input.color_hex)?;

    find_owned_project(&state, &id, &user).await?;

    let project = ProjectRepo::update(state.store.as_ref(), &id, &input)
        .await
        .map_err(|err| AppError::backend("Error updating project", err))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects
///
/// Removes the project document first, then its tasks. Task removal is a
/// best-effort cascade: failures are logged and do not fail the request.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<DeleteProjectRequest>,
) -> AppResult<StatusCode> {
    let Some(id) = input.id.filter(|id| !id.is_empty()) else {
        return Err(AppError::Core(CoreError::Validation(
            "No project found with this id.".into(),
        )));
    };

    find_owned_project(&state, &id, &user).await?;

    let deleted = ProjectRepo::delete(state.store.as_ref(), &id)
        .await
        .map_err(|err| AppError::backend("Error deleting project", err))?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    delete_project_tasks(state.store.as_ref(), &id, &user.user_id).await;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a project and ensure it belongs to the session user.
async fn find_owned_project(state: &AppState, id: &str, user: &CurrentUser) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(state.store.as_ref(), id)
        .await
        .map_err(|err| AppError::backend("Error getting project", err))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: id.to_string(),
        }))?;

    if project.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    Ok(project)
}

/// Insert generated drafts as tasks of the project. Best-effort batch:
/// the creates run concurrently, failures are logged, and writes that
/// landed stand. No compensation on partial failure.
async fn create_draft_tasks(
    store: &dyn DocumentStore,
    project_id: &str,
    user_id: &str,
    drafts: Vec<TaskDraft>,
) {
    let creates = drafts.into_iter().map(|draft| {
        let input = CreateTask {
            content: draft.content,
            due_date: draft.due_date,
            project: Some(project_id.to_string()),
        };
        async move { TaskRepo::create(store, &input, user_id).await }
    });

    for err in join_all(creates).await.into_iter().filter_map(Result::err) {
        tracing::error!(error = %err, project_id, "Error creating project tasks");
    }
}

/// Delete every task of the project, concurrently and best-effort.
async fn delete_project_tasks(store: &dyn DocumentStore, project_id: &str, user_id: &str) {
    let task_ids = match TaskRepo::project_task_ids(store, project_id, user_id).await {
        Ok(task_ids) => task_ids,
        Err(err) => {
            tracing::error!(error = %err, project_id, "Error listing tasks for cascade delete");
            return;
        }
    };

    let deletes = task_ids
        .iter()
        .map(|task_id| TaskRepo::delete(store, task_id));
    for err in join_all(deletes).await.into_iter().filter_map(Result::err) {
        tracing::error!(error = %err, project_id, "Error deleting project tasks");
    }
}

/// Order open tasks for the detail view: soonest due date first, undated
/// tasks after every dated one.
fn sort_by_due_date(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

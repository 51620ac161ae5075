//! Repository for the `tasks` collection.

use serde_json::{json, Map, Value};
use taskory_core::dates::{start_of_today, today_bounds};
use taskory_core::types::new_document_id;
use taskory_core::views::TaskView;

use crate::backend::DocumentStore;
use crate::document::{DocumentList, FIELD_ID, FIELD_UPDATED_AT};
use crate::error::StoreError;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::query::Query;

/// Collection holding task documents.
pub const COLLECTION: &str = "tasks";

/// Page cap when collecting a project's task ids for cascade deletion.
pub const CASCADE_LIMIT: usize = 100;

/// Provides CRUD and view listings for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task owned by the given user. New tasks start
    /// incomplete regardless of input.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &CreateTask,
        user_id: &str,
    ) -> Result<Task, StoreError> {
        let mut data = Map::new();
        data.insert("content".into(), Value::String(input.content.clone()));
        data.insert("completed".into(), Value::Bool(false));
        data.insert("due_date".into(), json!(input.due_date));
        data.insert("project".into(), json!(input.project));
        data.insert("userId".into(), Value::String(user_id.to_string()));

        let document = store
            .create_document(COLLECTION, &new_document_id(), Value::Object(data))
            .await?;
        Ok(serde_json::from_value(document)?)
    }

    /// Apply the provided fields to an existing task. Fields absent from
    /// `input` keep their stored value; explicit nulls clear `due_date`
    /// or `project`. Returns `None` when no task with the id exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: &UpdateTask,
    ) -> Result<Option<Task>, StoreError> {
        let mut data = Map::new();
        if let Some(content) = &input.content {
            data.insert("content".into(), Value::String(content.clone()));
        }
        if let Some(completed) = input.completed {
            data.insert("completed".into(), Value::Bool(completed));
        }
        if let Some(due_date) = &input.due_date {
            data.insert("due_date".into(), json!(due_date));
        }
        if let Some(project) = &input.project {
            data.insert("project".into(), json!(project));
        }

        match store
            .update_document(COLLECTION, id, Value::Object(data))
            .await
        {
            Ok(document) => Ok(Some(serde_json::from_value(document)?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Delete a task by id. Returns `true` if a document was removed.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        match store.delete_document(COLLECTION, id).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Fetch a single task by id, `None` when it does not exist.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Task>, StoreError> {
        match store.get_document(COLLECTION, id).await {
            Ok(document) => Ok(Some(serde_json::from_value(document)?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Ids of the tasks attached to a project, capped at one cascade
    /// page of [`CASCADE_LIMIT`]. Only the id attribute is pulled.
    pub async fn project_task_ids(
        store: &dyn DocumentStore,
        project_id: &str,
        user_id: &str,
    ) -> Result<Vec<String>, StoreError> {
        let queries = [
            Query::equal("project", project_id),
            Query::equal("userId", user_id),
            Query::select(&[FIELD_ID]),
            Query::limit(CASCADE_LIMIT),
        ];
        let list = store.list_documents(COLLECTION, &queries).await?;
        Ok(list
            .documents
            .iter()
            .filter_map(|document| document[FIELD_ID].as_str().map(str::to_string))
            .collect())
    }

    /// List the tasks a view shows for the given user.
    pub async fn list(
        store: &dyn DocumentStore,
        view: &TaskView,
        user_id: &str,
    ) -> Result<DocumentList<Task>, StoreError> {
        let queries = Self::view_queries(view, user_id);
        store.list_documents(COLLECTION, &queries).await?.decode()
    }

    /// Number of tasks a view would show, without pulling documents: the
    /// listing is capped at one projected id and the match total is read
    /// off the response.
    pub async fn count(
        store: &dyn DocumentStore,
        view: &TaskView,
        user_id: &str,
    ) -> Result<usize, StoreError> {
        let mut queries = Self::view_queries(view, user_id);
        queries.push(Query::select(&[FIELD_ID]));
        queries.push(Query::limit(1));
        Ok(store.list_documents(COLLECTION, &queries).await?.total)
    }

    /// Filter and ordering set for each task view. All views scope to the
    /// owning user; this is the single place view semantics live.
    fn view_queries(view: &TaskView, user_id: &str) -> Vec<Query> {
        let mut queries = match view {
            TaskView::Inbox => vec![
                Query::equal("completed", false),
                Query::is_null("project"),
            ],
            TaskView::Today => {
                let (start, end) = today_bounds();
                vec![
                    Query::equal("completed", false),
                    Query::and(vec![
                        Query::greater_than_equal("due_date", json!(start)),
                        Query::less_than("due_date", json!(end)),
                    ]),
                ]
            }
            TaskView::Upcoming => vec![
                Query::equal("completed", false),
                Query::is_not_null("due_date"),
                Query::greater_than_equal("due_date", json!(start_of_today())),
                Query::order_asc("due_date"),
            ],
            TaskView::Completed => vec![
                Query::equal("completed", true),
                Query::order_desc(FIELD_UPDATED_AT),
            ],
            TaskView::Project(project_id) => {
                vec![Query::equal("project", project_id.as_str())]
            }
        };
        queries.push(Query::equal("userId", user_id));
        queries
    }
}

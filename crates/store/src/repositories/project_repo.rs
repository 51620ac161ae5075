//! Repository for the `projects` collection.

use serde_json::json;
use taskory_core::types::new_document_id;

use crate::backend::DocumentStore;
use crate::document::{DocumentList, FIELD_CREATED_AT};
use crate::error::StoreError;
use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};
use crate::query::Query;

/// Collection holding project documents.
pub const COLLECTION: &str = "projects";

/// Attributes projected into summary and search listings.
const SUMMARY_FIELDS: [&str; 5] = ["$id", "name", "color_name", "color_hex", "$createdAt"];

/// Page cap for the all-projects summary listing.
pub const SUMMARY_LIMIT: usize = 100;

/// Provides CRUD and listings for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by the given user.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &CreateProject,
        user_id: &str,
    ) -> Result<Project, StoreError> {
        let data = json!({
            "name": input.name,
            "color_name": input.color_name,
            "color_hex": input.color_hex,
            "userId": user_id,
        });

        let document = store
            .create_document(COLLECTION, &new_document_id(), data)
            .await?;
        Ok(serde_json::from_value(document)?)
    }

    /// Find a project by id. Returns `None` when it does not exist.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Project>, StoreError> {
        match store.get_document(COLLECTION, id).await {
            Ok(document) => Ok(Some(serde_json::from_value(document)?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Newest-first summaries of the user's projects, capped at
    /// [`SUMMARY_LIMIT`]. `total` still counts every project.
    pub async fn list_summaries(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<DocumentList<ProjectSummary>, StoreError> {
        let queries = [
            Query::equal("userId", user_id),
            Query::order_desc(FIELD_CREATED_AT),
            Query::limit(SUMMARY_LIMIT),
            Query::select(&SUMMARY_FIELDS),
        ];
        store.list_documents(COLLECTION, &queries).await?.decode()
    }

    /// Summaries of the user's projects whose name contains `term`,
    /// newest first.
    pub async fn search(
        store: &dyn DocumentStore,
        term: &str,
        user_id: &str,
    ) -> Result<DocumentList<ProjectSummary>, StoreError> {
        let queries = [
            Query::contains("name", term),
            Query::equal("userId", user_id),
            Query::order_desc(FIELD_CREATED_AT),
            Query::select(&SUMMARY_FIELDS),
        ];
        store.list_documents(COLLECTION, &queries).await?.decode()
    }

    /// Rewrite the project's name and colors. Returns `None` when no
    /// project with the id exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, StoreError> {
        let data = json!({
            "name": input.name,
            "color_name": input.color_name,
            "color_hex": input.color_hex,
        });

        match store.update_document(COLLECTION, id, data).await {
            Ok(document) => Ok(Some(serde_json::from_value(document)?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Delete a project by id. Returns `true` if a document was removed.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        match store.delete_document(COLLECTION, id).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

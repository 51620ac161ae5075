//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use taskory_core::types::{DocumentId, Timestamp, UserId};

use crate::models::double_option;

/// A task document from the `tasks` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "$id")]
    pub id: DocumentId,
    pub content: String,
    pub completed: bool,
    /// When the task is due, or `None` for no due date.
    pub due_date: Option<Timestamp>,
    /// Owning project id, or `None` for inbox tasks.
    pub project: Option<DocumentId>,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "$createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "$updatedAt")]
    pub updated_at: Timestamp,
}

/// DTO for creating a new task. New tasks always start incomplete.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub content: String,
    #[serde(default)]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub project: Option<DocumentId>,
}

/// DTO for updating an existing task. Only the provided fields are written;
/// `due_date` and `project` accept an explicit null to clear the value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    /// Id of the task to update. Carried in the body, validated by the
    /// handler before the write.
    #[serde(default)]
    pub id: Option<DocumentId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "double_option")]
    pub project: Option<Option<DocumentId>>,
}

//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use taskory_core::types::{DocumentId, Timestamp, UserId};

/// A project document from the `projects` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "$id")]
    pub id: DocumentId,
    pub name: String,
    /// Display name of the project color, e.g. `"Slate"`.
    pub color_name: String,
    /// Hex value of the project color, e.g. `"#64748b"`.
    pub color_hex: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "$createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "$updatedAt")]
    pub updated_at: Timestamp,
}

/// Projected shape returned by summary and search listings. Listing every
/// project only needs what the navigation sidebar renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(rename = "$id")]
    pub id: DocumentId,
    pub name: String,
    pub color_name: String,
    pub color_hex: String,
    #[serde(rename = "$createdAt")]
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub color_name: String,
    pub color_hex: String,
}

/// DTO for updating an existing project. Updates always rewrite the name
/// and both color fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    /// Id of the project to update. Carried in the body, validated by the
    /// handler before the write.
    #[serde(default)]
    pub id: Option<DocumentId>,
    pub name: String,
    pub color_name: String,
    pub color_hex: String,
}

//! Typed views over the stored documents, plus request DTOs.

pub mod project;
pub mod task;

pub use project::{CreateProject, Project, ProjectSummary, UpdateProject};
pub use task::{CreateTask, Task, UpdateTask};

/// Deserializes a field that distinguishes "absent" from "explicitly null":
/// absent stays `None` (via `#[serde(default)]`), a JSON null becomes
/// `Some(None)`, and a value becomes `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

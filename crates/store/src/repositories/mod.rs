//! Collection-level data access built on [`crate::DocumentStore`].

pub mod project_repo;
pub mod task_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;

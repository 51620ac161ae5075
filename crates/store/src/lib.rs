//! Document persistence for taskory.
//!
//! Task and project records live in a hosted document store reached over
//! HTTP. Everything above this crate talks to the [`DocumentStore`] trait,
//! so the hosted client ([`AppwriteStore`]) and the in-process test double
//! ([`MemoryStore`]) are interchangeable.

pub mod appwrite;
pub mod backend;
pub mod document;
pub mod error;
pub mod memory;
pub mod models;
pub mod query;
pub mod repositories;

pub use appwrite::{AppwriteConfig, AppwriteStore};
pub use backend::DocumentStore;
pub use document::DocumentList;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use query::Query;

/// Verifies that the document store is reachable and the credentials are
/// accepted, by listing a single project document.
///
/// Called once at startup so a bad endpoint or API key fails fast instead
/// of surfacing on the first user request.
pub async fn health_check(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store
        .list_documents(
            repositories::project_repo::COLLECTION,
            &[Query::select(&["$id"]), Query::limit(1)],
        )
        .await?;
    Ok(())
}

use async_trait::async_trait;
use serde_json::Value;

use crate::document::DocumentList;
use crate::error::StoreError;
use crate::query::Query;

/// CRUD plus filtered listing over named document collections.
///
/// Documents are JSON objects; backends own the `$id`, `$createdAt` and
/// `$updatedAt` system attributes and merge caller data around them.
/// Repositories build on this trait, so handlers never see a concrete
/// backend type.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document under the caller-supplied id.
    async fn create_document(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, StoreError>;

    /// Fetches one document by id.
    async fn get_document(&self, collection: &str, document_id: &str)
        -> Result<Value, StoreError>;

    /// Merges `data` into an existing document and bumps `$updatedAt`.
    /// Attributes absent from `data` keep their stored value; an explicit
    /// JSON null clears the attribute.
    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, StoreError>;

    /// Deletes one document by id.
    async fn delete_document(&self, collection: &str, document_id: &str)
        -> Result<(), StoreError>;

    /// Lists documents matching the given queries. Filters combine with AND;
    /// see [`Query`] for ordering, paging and projection clauses.
    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList<Value>, StoreError>;
}

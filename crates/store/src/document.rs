//! Raw document shapes shared by every store backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// System attribute holding the document id.
pub const FIELD_ID: &str = "$id";
/// System attribute holding the creation timestamp.
pub const FIELD_CREATED_AT: &str = "$createdAt";
/// System attribute holding the last-update timestamp.
pub const FIELD_UPDATED_AT: &str = "$updatedAt";

/// One page of documents plus the total number of matches.
///
/// `total` counts every document matching the filters, not the page size,
/// so a `Limit(1)` listing still reports the full match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList<T> {
    pub total: usize,
    pub documents: Vec<T>,
}

impl DocumentList<Value> {
    /// Decodes each raw document into `T`, keeping `total` untouched.
    pub fn decode<T: DeserializeOwned>(self) -> Result<DocumentList<T>, StoreError> {
        let documents = self
            .documents
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;
        Ok(DocumentList {
            total: self.total,
            documents,
        })
    }
}

/// Reads the `$id` system attribute from a raw document.
pub fn document_id(document: &Value) -> Option<&str> {
    document.get(FIELD_ID).and_then(Value::as_str)
}

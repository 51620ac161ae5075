use thiserror::Error;

/// Errors surfaced by document store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The HTTP request to the hosted store could not be completed.
    #[error("Document store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store rejected the request with a non-success status.
    #[error("Document store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The addressed document does not exist.
    #[error("Document not found: {collection}/{document_id}")]
    NotFound {
        collection: String,
        document_id: String,
    },

    /// A store response could not be decoded into the expected shape.
    #[error("Failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, document_id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            document_id: document_id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

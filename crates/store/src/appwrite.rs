//! HTTP client for a hosted Appwrite-compatible document database.
//!
//! Talks to the `databases/{db}/collections/{collection}/documents`
//! endpoints using [`reqwest`], authenticating every request with the
//! project id and server API key headers.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::backend::DocumentStore;
use crate::document::DocumentList;
use crate::error::StoreError;
use crate::query::Query;

/// Header carrying the project id.
const HEADER_PROJECT: &str = "X-Appwrite-Project";
/// Header carrying the server API key.
const HEADER_KEY: &str = "X-Appwrite-Key";

/// Default API endpoint for the hosted service.
const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Connection settings for the hosted document store.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// Base API URL, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    /// Project identifier sent with every request.
    pub project_id: String,
    /// Server API key with database read/write scopes.
    pub api_key: String,
    /// Database holding the task and project collections.
    pub database_id: String,
}

impl AppwriteConfig {
    /// Load store configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                         |
    /// |------------------------|----------|---------------------------------|
    /// | `APPWRITE_ENDPOINT`    | no       | `https://cloud.appwrite.io/v1`  |
    /// | `APPWRITE_PROJECT_ID`  | **yes**  | --                              |
    /// | `APPWRITE_API_KEY`     | **yes**  | --                              |
    /// | `APPWRITE_DATABASE_ID` | **yes**  | --                              |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("APPWRITE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        let project_id = std::env::var("APPWRITE_PROJECT_ID")
            .expect("APPWRITE_PROJECT_ID must be set in the environment");
        let api_key = std::env::var("APPWRITE_API_KEY")
            .expect("APPWRITE_API_KEY must be set in the environment");
        let database_id = std::env::var("APPWRITE_DATABASE_ID")
            .expect("APPWRITE_DATABASE_ID must be set in the environment");

        Self {
            endpoint,
            project_id,
            api_key,
            database_id,
        }
    }
}

/// [`DocumentStore`] backed by the hosted HTTP API.
pub struct AppwriteStore {
    client: reqwest::Client,
    config: AppwriteConfig,
}

impl AppwriteStore {
    pub fn new(config: AppwriteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Build a store reusing an existing [`reqwest::Client`] for
    /// connection pooling.
    pub fn with_client(client: reqwest::Client, config: AppwriteConfig) -> Self {
        Self { client, config }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint, self.config.database_id, collection
        )
    }

    fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), document_id)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(HEADER_PROJECT, &self.config.project_id)
            .header(HEADER_KEY, &self.config.api_key)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. A 404 on a request
    /// that addressed a single document becomes [`StoreError::NotFound`];
    /// any other failure carries the status and the store's error message.
    async fn ensure_success(
        response: reqwest::Response,
        collection: &str,
        document_id: &str,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND && !document_id.is_empty() {
                return Err(StoreError::not_found(collection, document_id));
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        collection: &str,
        document_id: &str,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response, collection, document_id).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(
        response: reqwest::Response,
        collection: &str,
        document_id: &str,
    ) -> Result<(), StoreError> {
        Self::ensure_success(response, collection, document_id).await?;
        Ok(())
    }
}

/// Pull the `message` field out of a store error body, falling back to the
/// raw text when the body is not the expected JSON shape.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn create_document(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, StoreError> {
        let body = json!({
            "documentId": document_id,
            "data": data,
        });

        let response = self
            .request(reqwest::Method::POST, self.collection_url(collection))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response, collection, document_id).await
    }

    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Value, StoreError> {
        let response = self
            .request(
                reqwest::Method::GET,
                self.document_url(collection, document_id),
            )
            .send()
            .await?;

        Self::parse_response(response, collection, document_id).await
    }

    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value, StoreError> {
        let body = json!({ "data": data });

        let response = self
            .request(
                reqwest::Method::PATCH,
                self.document_url(collection, document_id),
            )
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response, collection, document_id).await
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                self.document_url(collection, document_id),
            )
            .send()
            .await?;

        Self::check_status(response, collection, document_id).await
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList<Value>, StoreError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_wire_string()))
            .collect();

        let response = self
            .request(reqwest::Method::GET, self.collection_url(collection))
            .query(&params)
            .send()
            .await?;

        Self::parse_response(response, collection, "").await
    }
}

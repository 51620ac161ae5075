//! REST client for the Gemini `generateContent` endpoint.
//!
//! Sends a single text prompt with a generation configuration requesting
//! JSON output, and returns the first candidate's text using [`reqwest`].

use serde::Deserialize;
use serde_json::json;

/// Default API base URL for the hosted service.
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Connection settings for the generative-AI endpoint.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base API URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub endpoint: String,
    /// API key appended to every request.
    pub api_key: String,
    /// Model addressed by generation requests, e.g. `gemini-1.5-flash`.
    pub model: String,
}

impl GeminiConfig {
    /// Load generation configuration from environment variables.
    ///
    /// | Env Var          | Required | Default            |
    /// |------------------|----------|--------------------|
    /// | `GEMINI_API_KEY` | **yes**  | --                 |
    /// | `GEMINI_MODEL`   | no       | `gemini-1.5-flash` |
    ///
    /// # Panics
    ///
    /// Panics if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set in the environment");
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key,
            model,
        }
    }
}

/// Errors from the generative-AI REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The endpoint answered 2xx but produced no candidate text.
    #[error("Generation response contained no candidate text")]
    EmptyResponse,
}

/// Response shape of `models/{model}:generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn first_candidate_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// HTTP client for the Gemini text-generation API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] for
    /// connection pooling.
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        )
    }

    /// Run one generation request and return the raw response text.
    ///
    /// The generation configuration asks the model for JSON output, but the
    /// returned text is not validated against any schema -- callers own the
    /// parsing and must treat malformed output as "no result".
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GenAiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<GenerateContentResponse>().await?;
        parsed
            .first_candidate_text()
            .ok_or(GenAiError::EmptyResponse)
    }
}

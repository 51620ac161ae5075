//! Task draft generation on top of the Gemini client.
//!
//! [`GeminiTaskGenerator`] turns a free-text project prompt into task
//! drafts: it builds one generation request embedding the expected output
//! schema and the current date (so "by Friday" resolves correctly), then
//! parses the model's JSON answer leniently. Anything that goes wrong --
//! network, API status, unparseable output -- is logged and degrades to an
//! empty draft list; project creation never fails on this path.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, SecondsFormat};
use serde_json::Value;
use taskory_core::dates::start_of_day;
use taskory_core::types::Timestamp;

use crate::api::GeminiClient;

/// A generated, not-yet-persisted task candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub content: String,
    pub due_date: Option<Timestamp>,
}

/// Produces task drafts for a project-creation prompt.
///
/// Implementations are best-effort by contract: they log failures and
/// return an empty list instead of erroring, so callers can always
/// proceed without drafts.
#[async_trait]
pub trait TaskGenerator: Send + Sync {
    async fn generate_tasks(&self, prompt: &str) -> Vec<TaskDraft>;
}

/// [`TaskGenerator`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiTaskGenerator {
    client: GeminiClient,
}

impl GeminiTaskGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskGenerator for GeminiTaskGenerator {
    async fn generate_tasks(&self, prompt: &str) -> Vec<TaskDraft> {
        let request = build_prompt(prompt, Local::now());

        let text = match self.client.generate_content(&request).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "Error generating tasks");
                return Vec::new();
            }
        };

        parse_drafts(&text)
    }
}

/// Build the full generation prompt: the user's free-text request, the
/// current date for resolving relative due dates, and a literal description
/// of the expected output schema.
fn build_prompt(prompt: &str, now: DateTime<Local>) -> String {
    let today = now.to_rfc3339_opts(SecondsFormat::Secs, false);
    format!(
        "Generate and return a list of tasks based on the provided prompt and the given JSON schema.\n\
         \n\
         Prompt: {prompt}\n\
         \n\
         Task Schema:\n\
         {{\n\
         \x20 content: string; // Description of the task\n\
         \x20 due_date: Date | null; // Due date of the task, or null if no specific due date is provided\n\
         }}\n\
         \n\
         Requirements:\n\
         1. Ensure tasks align with the provided prompt.\n\
         2. Set the 'due_date' relative to today's date: {today}.\n\
         3. Return an array of tasks matching the schema.\n\
         \n\
         Output: Array<Task>"
    )
}

/// Parse the model's response text into drafts.
///
/// The text must be a JSON array of `{content, due_date}` objects. A
/// response that is not valid JSON, or not an array, yields an empty list;
/// individual entries without usable content are skipped. Failures are
/// logged, never propagated.
fn parse_drafts(text: &str) -> Vec<TaskDraft> {
    let value: Value = match serde_json::from_str(text.trim()) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "Discarding malformed generation output");
            return Vec::new();
        }
    };

    let Some(items) = value.as_array() else {
        tracing::warn!("Discarding generation output: expected a JSON array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let draft = draft_from_value(item);
            if draft.is_none() {
                tracing::debug!(item = %item, "Skipping generated entry without content");
            }
            draft
        })
        .collect()
}

fn draft_from_value(item: &Value) -> Option<TaskDraft> {
    let content = item.get("content")?.as_str()?.trim();
    if content.is_empty() {
        return None;
    }

    let due_date = item.get("due_date").and_then(parse_due_date);

    Some(TaskDraft {
        content: content.to_string(),
        due_date,
    })
}

/// Read a due date from a generated entry. Accepts RFC 3339 timestamps or
/// bare `YYYY-MM-DD` dates (taken as local midnight); anything else counts
/// as "no due date".
fn parse_due_date(value: &Value) -> Option<Timestamp> {
    let text = value.as_str()?;

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.to_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

//! Deterministic [`TaskGenerator`] for tests, no API calls involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::generator::{TaskDraft, TaskGenerator};

/// Mock generator that returns pre-programmed draft lists in sequence.
///
/// Each call consumes the next scripted response; once the script is
/// exhausted the mock returns an empty list, matching the degraded-mode
/// contract of the trait. Prompts are recorded for assertions.
pub struct MockTaskGenerator {
    responses: Vec<Vec<TaskDraft>>,
    call_count: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTaskGenerator {
    pub fn new(responses: Vec<Vec<TaskDraft>>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A generator that always comes back empty-handed.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Convenience: script a single response of plain-content drafts.
    pub fn with_drafts(contents: &[&str]) -> Self {
        let drafts = contents
            .iter()
            .map(|content| TaskDraft {
                content: (*content).to_string(),
                due_date: None,
            })
            .collect();
        Self::new(vec![drafts])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskGenerator for MockTaskGenerator {
    async fn generate_tasks(&self, prompt: &str) -> Vec<TaskDraft> {
        let idx = self.call_count.fetch_add(1, Ordering::Relaxed);
        self.prompts.lock().unwrap().push(prompt.to_string());

        self.responses.get(idx).cloned().unwrap_or_default()
    }
}

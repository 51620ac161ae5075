//! Generative-AI task drafting for taskory.
//!
//! Wraps the hosted Gemini text endpoint behind the [`TaskGenerator`]
//! trait: a project-creation prompt goes in, a list of [`TaskDraft`]s
//! comes out. Generation is strictly best-effort -- API failures and
//! malformed model output degrade to an empty draft list so project
//! creation never fails on the AI path.

pub mod api;
pub mod generator;
pub mod mock;

pub use api::{GeminiClient, GeminiConfig, GenAiError};
pub use generator::{GeminiTaskGenerator, TaskDraft, TaskGenerator};
pub use mock::MockTaskGenerator;

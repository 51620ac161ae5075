use std::sync::Arc;

use taskory_genai::TaskGenerator;
use taskory_store::DocumentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store holding tasks and projects.
    pub store: Arc<dyn DocumentStore>,
    /// Task draft generator used on project creation.
    pub generator: Arc<dyn TaskGenerator>,
    /// Server configuration (session secret, timeouts, CORS origins).
    pub config: Arc<ServerConfig>,
}

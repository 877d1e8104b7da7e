use std::sync::Arc;

use crate::config::Config;
use crate::intelligence::policy::PolicyRegistry;
use crate::llm_client::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion gateway. `LlmClient` in production, stubs in tests.
    pub gateway: Arc<dyn CompletionGateway>,
    /// Read-only per-domain policies, built once at startup.
    pub policies: Arc<PolicyRegistry>,
    pub config: Config,
}

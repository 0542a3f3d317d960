use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion provider. Concrete `OpenAiClient` in production,
    /// swapped for a fake in handler tests.
    pub chat: Arc<dyn ChatCompleter>,
    /// Process-wide configuration, loaded once at startup and never mutated.
    #[allow(dead_code)]
    pub config: Config,
}

use std::sync::Arc;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::forms::FormRegistry;
use crate::llm_client::CompletionCapability;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub completion: CompletionClient,
    pub forms: FormRegistry,
    /// Upload size cap for file-modality features.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wires the state from configuration and an explicit completion capability.
    pub fn new(config: &Config, capability: Arc<dyn CompletionCapability>) -> Self {
        Self {
            completion: CompletionClient::new(capability),
            forms: FormRegistry::new(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

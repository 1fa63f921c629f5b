//! Completion Client: sends one composed prompt to the completion capability
//! and normalizes the outcome into a `CompletionResult`.
//!
//! Flow: CompletionRequest → compose prompt → capability.complete() → normalize.
//! Exactly one upstream call per submission; upstream errors become
//! `CompletionResult::Failure`, never a Rust error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::features::composer::{assemble_prompt, build_payload};
use crate::features::{FeatureId, FeatureInput};
use crate::llm_client::CompletionCapability;

/// Message used when the capability answers with nothing but whitespace.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Empty response from the completion service";

/// One submission's worth of data. Built fresh per submission and dropped
/// once the response arrives.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub user_input: String,
    pub system_prompt: String,
    pub feature_label: String,
}

impl CompletionRequest {
    /// Builds a request for `feature` with its catalog template and label.
    pub fn for_feature(feature: FeatureId, input: &FeatureInput) -> Self {
        let descriptor = feature.descriptor();
        Self {
            user_input: build_payload(feature, input),
            system_prompt: descriptor.system_prompt.to_string(),
            feature_label: descriptor.label.to_string(),
        }
    }

    pub fn prompt(&self) -> String {
        assemble_prompt(&self.system_prompt, &self.feature_label, &self.user_input)
    }
}

/// Tagged outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CompletionResult {
    Success { text: String },
    Failure { message: String },
}

impl CompletionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionResult::Success { .. })
    }
}

/// Shared, cheap-to-clone handle to the completion capability.
#[derive(Clone)]
pub struct CompletionClient {
    capability: Arc<dyn CompletionCapability>,
}

impl CompletionClient {
    pub fn new(capability: Arc<dyn CompletionCapability>) -> Self {
        Self { capability }
    }

    /// Issues exactly one request and normalizes the result.
    pub async fn submit(&self, request: &CompletionRequest) -> CompletionResult {
        info!("Processing {} request", request.feature_label);

        match self.capability.complete(&request.prompt()).await {
            Ok(text) if !text.trim().is_empty() => {
                info!("Successfully generated {} response", request.feature_label);
                CompletionResult::Success { text }
            }
            Ok(_) => {
                error!("{} request returned an empty response", request.feature_label);
                CompletionResult::Failure {
                    message: EMPTY_RESPONSE_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                error!("{} request failed: {e}", request.feature_label);
                CompletionResult::Failure {
                    message: e.to_string(),
                }
            }
        }
    }
}

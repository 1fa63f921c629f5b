//! Prompt Composer: turns a feature and raw user input into the full prompt.
//!
//! Pure string assembly. Callers validate that the input is non-blank first.

use serde::Deserialize;

use crate::features::catalog::{FeatureDescriptor, FeatureId};
use crate::llm_client::prompts::{RESPONSE_FORMAT_INSTRUCTION, USER_REQUEST_HEADER};

/// Raw input collected by a form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureInput {
    pub text: String,
    /// Optional topic tags (Card Cutter).
    #[serde(default)]
    pub tags: Option<String>,
}

impl FeatureInput {
    #[cfg(test)]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: None,
        }
    }

    #[cfg(test)]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

type PayloadFn = fn(&FeatureInput) -> String;

/// Payload builder per feature, indexed by `FeatureId as usize`.
const PAYLOAD_BUILDERS: [(FeatureId, PayloadFn); 7] = [
    (FeatureId::Rebuttal, verbatim),
    (FeatureId::CardCutter, evidence_payload),
    (FeatureId::Storage, verbatim),
    (FeatureId::Extemp, verbatim),
    (FeatureId::WordChoice, verbatim),
    (FeatureId::SpeechAnalysis, verbatim),
    (FeatureId::ProcessFlow, verbatim),
];

fn verbatim(input: &FeatureInput) -> String {
    input.text.clone()
}

fn evidence_payload(input: &FeatureInput) -> String {
    let mut payload = format!("Content to analyze: {}", input.text);
    // Tags are trimmed, and whitespace-only tags count as absent.
    if let Some(tags) = input.tags.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        payload.push_str("\nTags/Topics: ");
        payload.push_str(tags);
    }
    payload
}

/// Builds the user payload for a feature (the part under the request header).
pub fn build_payload(feature: FeatureId, input: &FeatureInput) -> String {
    let (_, build) = PAYLOAD_BUILDERS[feature as usize];
    build(input)
}

/// Assembles the final prompt from a template, a label and an already-built payload.
pub fn assemble_prompt(system_prompt: &str, label: &str, payload: &str) -> String {
    let header = USER_REQUEST_HEADER.replace("{label}", &label.to_uppercase());
    format!("{system_prompt}\n\n{header}\n{payload}\n\n{RESPONSE_FORMAT_INSTRUCTION}")
}

/// Composes the full prompt for `feature`: template, labelled payload, closing instruction.
/// Submissions go through `CompletionRequest`, which carries the same pieces.
#[allow(dead_code)]
pub fn compose_prompt(feature: FeatureId, input: &FeatureInput) -> String {
    let descriptor: &FeatureDescriptor = feature.descriptor();
    assemble_prompt(
        descriptor.system_prompt,
        descriptor.label,
        &build_payload(feature, input),
    )
}

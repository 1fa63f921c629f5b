// Debate tools: the fixed catalog and prompt composition.
// No LLM calls happen here: composition is pure.

pub mod catalog;
pub mod composer;
pub mod handlers;
pub mod prompts;
pub mod upload;

pub use catalog::{catalog, FeatureDescriptor, FeatureId, InputModality};
pub use composer::FeatureInput;

//! Provider module
//!
//! Defines the ModelBackend trait and one REST binding per upstream API

pub mod claude;
pub mod gemini;
pub mod openai;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::ProviderId;
use crate::utils::error::GenerationError;

/// Completion length cap requested from every provider
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Sampling temperature requested from every provider
pub const TEMPERATURE: f64 = 0.8;

/// One model completion, normalized across providers
#[derive(Debug, Clone)]
pub struct Completion {
    /// Raw completion text, possibly empty
    pub text: String,
    /// Model identifier the provider reports, or the configured one
    pub model: String,
    /// Total token usage, when the provider reports it
    pub tokens: Option<u32>,
}

/// Capability surface of one upstream model API
///
/// A binding makes exactly one HTTP call per invoke and never retries.
/// Errors bubble up as plain messages; `classify` maps the full error
/// display text onto the shared taxonomy with that provider's rules.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Provider identity
    fn id(&self) -> ProviderId;

    /// Model requested from this provider
    fn model(&self) -> &str;

    /// Request one completion for the instruction
    async fn invoke(&self, instruction: &str, api_key: &str) -> Result<Completion>;

    /// Map an error message onto the generation error taxonomy
    fn classify(&self, message: &str) -> GenerationError;
}

pub use claude::ClaudeBackend;
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

//! Odai generation service
//!
//! The single control path from validated parameters to an odai list,
//! shared by every provider binding

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::models::{GenerationParams, OdaiData, ProviderId};
use crate::prompt;
use crate::providers::{ClaudeBackend, GeminiBackend, ModelBackend, OpenAiBackend};
use crate::utils::error::GenerationError;

/// Odai generation service
///
/// Owns one HTTP client shared by all provider bindings.
#[derive(Debug)]
pub struct OdaiGenerator {
    settings: Settings,
    openai: OpenAiBackend,
    claude: ClaudeBackend,
    gemini: GeminiBackend,
}

impl OdaiGenerator {
    /// Create a new generator instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request.timeout))
            .user_agent("odaigen/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            openai: OpenAiBackend::new(client.clone(), settings.openai.base_url.clone()),
            claude: ClaudeBackend::new(client.clone(), settings.claude.base_url.clone()),
            gemini: GeminiBackend::new(client, settings.gemini.base_url.clone()),
            settings,
        })
    }

    /// Generate odai through one provider
    ///
    /// Makes at most one upstream call; a missing API key fails before
    /// any network traffic. Never retries.
    pub async fn generate(
        &self,
        provider: ProviderId,
        params: &GenerationParams,
    ) -> Result<OdaiData, GenerationError> {
        let backend = self.backend(provider);

        let api_key = match self.settings.credential(provider) {
            Some(key) => key,
            None => {
                warn!("{} requested without an API key configured", provider);
                return Err(GenerationError::ConfigurationMissing(provider.env_key()));
            }
        };

        debug!("Generating {} odai via {}", params.count, provider);

        let instruction = prompt::build_prompt(provider, params);

        let completion = match backend.invoke(&instruction, api_key).await {
            Ok(completion) => completion,
            Err(e) => {
                let classified = backend.classify(&format!("{e:#}"));
                warn!("{} generation failed: {}", provider, classified);
                return Err(classified);
            }
        };

        if completion.text.is_empty() {
            warn!("{} returned an empty completion", provider);
            return Err(GenerationError::EmptyResponse(provider));
        }

        let odais = prompt::parse_response(&completion.text);
        if odais.is_empty() {
            warn!("{} completion yielded no usable lines", provider);
            return Err(GenerationError::ParseFailure(provider));
        }

        info!(
            "{} generated {} odai with model {}",
            provider,
            odais.len(),
            completion.model
        );
        debug!("{} token usage: {:?}", provider, completion.tokens);

        Ok(OdaiData {
            odais,
            source: provider,
            model: completion.model,
            tokens: completion.tokens,
        })
    }

    /// Look up the binding for one provider
    fn backend(&self, provider: ProviderId) -> &dyn ModelBackend {
        match provider {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Claude => &self.claude,
            ProviderId::Gemini => &self.gemini,
        }
    }
}

//! Gemini binding
//!
//! generateContent call against the Google Generative Language API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{Completion, ModelBackend, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::models::ProviderId;
use crate::utils::error::GenerationError;

/// Model requested from Gemini
const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Gemini backend
#[derive(Debug)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend sharing the given HTTP client
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Build the request URL; Gemini authenticates through a query parameter
    fn build_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            GEMINI_MODEL,
            api_key
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn model(&self) -> &str {
        GEMINI_MODEL
    }

    async fn invoke(&self, instruction: &str, api_key: &str) -> Result<Completion> {
        debug!("Sending Gemini generateContent request");

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: instruction.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.build_url(api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                error!("Gemini API error: {}", error_response.error.message);
                anyhow::bail!("{}", error_response.error.message);
            }

            error!("Gemini API request failed: {} - {}", status, error_text);
            anyhow::bail!("{} - {}", status, error_text);
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response body")?;

        // First candidate only; a safety-blocked reply has no content
        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        debug!("Gemini request completed successfully");

        Ok(Completion {
            text,
            model: GEMINI_MODEL.to_string(),
            tokens: reply.usage_metadata.map(|usage| usage.total_token_count),
        })
    }

    fn classify(&self, message: &str) -> GenerationError {
        let haystack = message.to_lowercase();

        // Gemini folds quota exhaustion into rate limiting
        if haystack.contains("rate limit") || haystack.contains("quota") {
            GenerationError::RateLimited
        } else if haystack.contains("api key") {
            GenerationError::InvalidCredential
        } else {
            GenerationError::Provider {
                provider: ProviderId::Gemini,
                message: message.to_string(),
            }
        }
    }
}

//! Claude binding
//!
//! Messages call against the Anthropic API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{Completion, ModelBackend, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::models::ProviderId;
use crate::utils::error::GenerationError;

/// Model requested from Anthropic
const CLAUDE_MODEL: &str = "claude-3-7-sonnet-latest";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude backend
#[derive(Debug)]
pub struct ClaudeBackend {
    client: Client,
    base_url: String,
}

impl ClaudeBackend {
    /// Create a new Claude backend sharing the given HTTP client
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
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
impl ModelBackend for ClaudeBackend {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    fn model(&self) -> &str {
        CLAUDE_MODEL
    }

    async fn invoke(&self, instruction: &str, api_key: &str) -> Result<Completion> {
        debug!("Sending Claude messages request");

        let request = MessagesRequest {
            model: CLAUDE_MODEL.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user".to_string(),
                content: instruction.to_string(),
            }],
        };

        let response = self
            .client
            .post(self.build_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                error!("Claude API error: {}", error_response.error.message);
                anyhow::bail!("{}", error_response.error.message);
            }

            error!("Claude API request failed: {} - {}", status, error_text);
            anyhow::bail!("{} - {}", status, error_text);
        }

        let messages: MessagesResponse = response
            .json()
            .await
            .context("Failed to parse Claude response body")?;

        // Join the text blocks; tool-use or other block types carry no text
        let text = messages
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        debug!("Claude request completed successfully");

        Ok(Completion {
            text,
            model: messages.model,
            tokens: messages
                .usage
                .map(|usage| usage.input_tokens + usage.output_tokens),
        })
    }

    fn classify(&self, message: &str) -> GenerationError {
        let haystack = message.to_lowercase();

        if haystack.contains("rate limit") {
            GenerationError::RateLimited
        } else if haystack.contains("quota") || haystack.contains("credit") {
            GenerationError::QuotaExceeded
        } else {
            GenerationError::Provider {
                provider: ProviderId::Claude,
                message: message.to_string(),
            }
        }
    }
}

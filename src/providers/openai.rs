//! OpenAI binding
//!
//! Chat-completions call against the OpenAI API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{Completion, ModelBackend, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::models::ProviderId;
use crate::utils::error::GenerationError;

/// Model requested from OpenAI
const OPENAI_MODEL: &str = "gpt-4o-mini";

/// OpenAI backend
#[derive(Debug)]
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
}

impl OpenAiBackend {
    /// Create a new OpenAI backend sharing the given HTTP client
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    model: String,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
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
impl ModelBackend for OpenAiBackend {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn model(&self) -> &str {
        OPENAI_MODEL
    }

    async fn invoke(&self, instruction: &str, api_key: &str) -> Result<Completion> {
        debug!("Sending OpenAI chat completion request");

        let request = ChatRequest {
            model: OPENAI_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: instruction.to_string(),
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.build_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                error!("OpenAI API error: {}", error_response.error.message);
                anyhow::bail!("{}", error_response.error.message);
            }

            error!("OpenAI API request failed: {} - {}", status, error_text);
            anyhow::bail!("{} - {}", status, error_text);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response body")?;

        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!("OpenAI request completed successfully");

        Ok(Completion {
            text,
            model: chat.model,
            tokens: chat.usage.map(|usage| usage.total_tokens),
        })
    }

    fn classify(&self, message: &str) -> GenerationError {
        let haystack = message.to_lowercase();

        if haystack.contains("rate limit") {
            GenerationError::RateLimited
        } else if haystack.contains("quota") {
            GenerationError::QuotaExceeded
        } else {
            GenerationError::Provider {
                provider: ProviderId::OpenAi,
                message: message.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> OpenAiBackend {
        OpenAiBackend::new(Client::new(), "https://api.openai.com/v1".to_string())
    }

    #[test]
    fn test_classify_rate_limit() {
        let error = backend().classify("Rate limit reached for gpt-4o-mini");
        assert!(matches!(error, GenerationError::RateLimited));
    }

    #[test]
    fn test_classify_quota() {
        let error = backend().classify("You exceeded your current quota");
        assert!(matches!(error, GenerationError::QuotaExceeded));
    }

    #[test]
    fn test_classify_other_keeps_message() {
        let error = backend().classify("connection reset by peer");
        match error {
            GenerationError::Provider { provider, message } => {
                assert_eq!(provider, ProviderId::OpenAi);
                assert_eq!(message, "connection reset by peer");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let backend = OpenAiBackend::new(Client::new(), "http://localhost:9000/v1/".to_string());
        assert_eq!(backend.build_url(), "http://localhost:9000/v1/chat/completions");
    }
}

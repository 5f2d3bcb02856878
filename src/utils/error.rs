//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ProviderErrors, ProviderId};

/// Failures of a single provider's generation pipeline
///
/// The display strings are the wire-visible error messages, so variants
/// must not be renamed without updating the clients.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Provider API key is missing from the environment
    #[error("{0} is not configured")]
    ConfigurationMissing(&'static str),

    /// Provider reported rate limiting
    #[error("API_RATE_LIMIT")]
    RateLimited,

    /// Provider reported exhausted quota or credits
    #[error("API_QUOTA_EXCEEDED")]
    QuotaExceeded,

    /// Provider rejected the API key
    #[error("Invalid API key")]
    InvalidCredential,

    /// Provider answered without any usable text
    #[error("No content received from {}", .0.display_name())]
    EmptyResponse(ProviderId),

    /// Completion text yielded no odai after normalization
    #[error("Failed to parse {} response", .0.display_name())]
    ParseFailure(ProviderId),

    /// Any other provider-side failure, with the original message
    #[error("{} API error: {message}", .provider.display_name())]
    Provider {
        provider: ProviderId,
        message: String,
    },
}

impl GenerationError {
    /// HTTP status this failure maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerationError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GenerationError::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            GenerationError::ConfigurationMissing(_)
            | GenerationError::InvalidCredential
            | GenerationError::EmptyResponse(_)
            | GenerationError::ParseFailure(_)
            | GenerationError::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Request-level error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("{0}")]
    Validation(String),

    /// Path named a provider this service does not know
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A single-provider generation failed
    #[error("{0}")]
    Generation(#[from] GenerationError),

    /// Every provider failed on the aggregate endpoint
    #[error("All AI services failed to generate content")]
    AllProvidersFailed(ProviderErrors),

    /// Catch-all, including unreadable request bodies
    #[error("Internal server error")]
    Internal,
}

/// Error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Per-provider failure messages (aggregate endpoint only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ProviderErrors>,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            ApiError::Generation(inner) => inner.status_code(),
            ApiError::AllProvidersFailed(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Build the response body for this error
    pub fn to_error_response(&self) -> ErrorResponse {
        let errors = match self {
            ApiError::AllProvidersFailed(errors) => Some(errors.clone()),
            _ => None,
        };

        ErrorResponse {
            success: false,
            error: self.to_string(),
            errors,
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self, status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_status_codes() {
        assert_eq!(
            GenerationError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            GenerationError::QuotaExceeded.status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            GenerationError::ConfigurationMissing("OPENAI_API_KEY").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GenerationError::InvalidCredential.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_generation_error_messages() {
        assert_eq!(GenerationError::RateLimited.to_string(), "API_RATE_LIMIT");
        assert_eq!(
            GenerationError::QuotaExceeded.to_string(),
            "API_QUOTA_EXCEEDED"
        );
        assert_eq!(
            GenerationError::ConfigurationMissing("GEMINI_API_KEY").to_string(),
            "GEMINI_API_KEY is not configured"
        );
        assert_eq!(
            GenerationError::EmptyResponse(ProviderId::OpenAi).to_string(),
            "No content received from OpenAI"
        );
        assert_eq!(
            GenerationError::ParseFailure(ProviderId::Claude).to_string(),
            "Failed to parse Claude response"
        );
        assert_eq!(
            GenerationError::Provider {
                provider: ProviderId::Gemini,
                message: "backend exploded".to_string(),
            }
            .to_string(),
            "Gemini API error: backend exploded"
        );
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::Validation("Count must be between 1 and 10".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnknownProvider("mistral".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Generation(GenerationError::RateLimited).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_envelope() {
        let error = ApiError::UnknownProvider("mistral".to_string());
        let body = error.to_error_response();

        assert!(!body.success);
        assert_eq!(body.error, "Unknown provider: mistral");
        assert!(body.errors.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_all_failed_envelope_carries_error_map() {
        let mut errors = ProviderErrors::default();
        errors.insert(ProviderId::OpenAi, "API_RATE_LIMIT".to_string());
        errors.insert(ProviderId::Claude, "API_QUOTA_EXCEEDED".to_string());
        errors.insert(ProviderId::Gemini, "Invalid API key".to_string());

        let error = ApiError::AllProvidersFailed(errors);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = error.to_error_response();
        assert_eq!(body.error, "All AI services failed to generate content");

        let map = body.errors.unwrap();
        assert_eq!(map.get(ProviderId::OpenAi), Some("API_RATE_LIMIT"));
        assert_eq!(map.get(ProviderId::Gemini), Some("Invalid API key"));
    }
}

//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::ProviderId;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// OpenAI API configuration
    pub openai: ProviderConfig,
    /// Anthropic API configuration
    pub claude: ProviderConfig,
    /// Gemini API configuration
    pub gemini: ProviderConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Per-provider API configuration
///
/// A missing key does not block startup; requests to that provider fail
/// with a "not configured" error instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key, when configured
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Outbound request timeout in seconds
    pub timeout: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8090")
                    .parse()
                    .context("Invalid port number")?,
            },
            openai: ProviderConfig {
                api_key: get_env_optional("OPENAI_API_KEY"),
                base_url: get_env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            },
            claude: ProviderConfig {
                api_key: get_env_optional("ANTHROPIC_API_KEY"),
                base_url: get_env_or_default("ANTHROPIC_BASE_URL", "https://api.anthropic.com"),
            },
            gemini: ProviderConfig {
                api_key: get_env_optional("GEMINI_API_KEY"),
                base_url: get_env_or_default(
                    "GEMINI_BASE_URL",
                    "https://generativelanguage.googleapis.com/v1beta",
                ),
            },
            request: RequestConfig {
                timeout: get_env_or_default("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        if ProviderId::ALL
            .iter()
            .all(|p| settings.credential(*p).is_none())
        {
            warn!("No provider API keys configured, all generation requests will fail");
        }

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Validate timeout values
        if self.request.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        for provider in ProviderId::ALL {
            let config = self.provider(provider);

            // Validate URL format
            if !config.base_url.starts_with("http") {
                anyhow::bail!(
                    "Invalid {} base URL format, should start with 'http'",
                    provider.display_name()
                );
            }

            // Basic key format validation - configured keys must not contain whitespace
            if let Some(key) = &config.api_key {
                if key.contains(char::is_whitespace) {
                    anyhow::bail!(
                        "{} cannot contain whitespace characters",
                        provider.env_key()
                    );
                }
            }
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Get one provider's API configuration
    pub fn provider(&self, provider: ProviderId) -> &ProviderConfig {
        match provider {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Claude => &self.claude,
            ProviderId::Gemini => &self.gemini,
        }
    }

    /// Get one provider's API key, when configured
    pub fn credential(&self, provider: ProviderId) -> Option<&str> {
        self.provider(provider).api_key.as_deref()
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable, treating unset and empty the same way
fn get_env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            server: ServerConfig {
                host: "localhost".to_string(),
                port: 8090,
            },
            openai: ProviderConfig {
                api_key: Some("sk-test".to_string()),
                base_url: "https://api.openai.com/v1".to_string(),
            },
            claude: ProviderConfig {
                api_key: None,
                base_url: "https://api.anthropic.com".to_string(),
            },
            gemini: ProviderConfig {
                api_key: Some("gm-test".to_string()),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            },
            request: RequestConfig { timeout: 30 },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_credential_lookup() {
        let settings = test_settings();

        assert_eq!(settings.credential(ProviderId::OpenAi), Some("sk-test"));
        assert_eq!(settings.credential(ProviderId::Claude), None);
        assert_eq!(settings.credential(ProviderId::Gemini), Some("gm-test"));
    }

    #[test]
    fn test_validate_accepts_missing_keys() {
        let mut settings = test_settings();
        settings.openai.api_key = None;
        settings.gemini.api_key = None;

        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut settings = test_settings();
        settings.server.port = 0;

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut settings = test_settings();
        settings.gemini.base_url = "generativelanguage.googleapis.com".to_string();

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_whitespace_in_key() {
        let mut settings = test_settings();
        settings.openai.api_key = Some("sk test".to_string());

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut settings = test_settings();
        settings.logging.format = "xml".to_string();

        assert!(settings.validate().is_err());
    }
}

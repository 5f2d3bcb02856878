//! API data models
//!
//! Defines the request/response structures of the generation endpoints
//! and the core enums shared across the service

use serde::{Deserialize, Serialize};
use std::fmt;

/// AI provider identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Claude,
    Gemini,
}

impl ProviderId {
    /// All providers, in response-field order
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAi, ProviderId::Claude, ProviderId::Gemini];

    /// Wire identifier, as used in URLs and response keys
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Claude => "claude",
            ProviderId::Gemini => "gemini",
        }
    }

    /// Human-readable name, as used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Claude => "Claude",
            ProviderId::Gemini => "Gemini",
        }
    }

    /// Name of the environment variable holding this provider's API key
    pub fn env_key(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OPENAI_API_KEY",
            ProviderId::Claude => "ANTHROPIC_API_KEY",
            ProviderId::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Parse a path segment into a provider identifier
    pub fn parse(value: &str) -> Option<ProviderId> {
        match value {
            "openai" => Some(ProviderId::OpenAi),
            "claude" => Some(ProviderId::Claude),
            "gemini" => Some(ProviderId::Gemini),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Odai category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Daily,
    Situation,
    Wordplay,
    Current,
    Character,
    Place,
    Object,
    Emotion,
    Fantasy,
    Food,
    Work,
    Family,
}

impl Category {
    /// Look up a category by its request tag
    ///
    /// Unknown tags yield `None`; callers skip the category section
    /// silently rather than rejecting the request.
    pub fn from_tag(tag: &str) -> Option<Category> {
        match tag {
            "daily" => Some(Category::Daily),
            "situation" => Some(Category::Situation),
            "wordplay" => Some(Category::Wordplay),
            "current" => Some(Category::Current),
            "character" => Some(Category::Character),
            "place" => Some(Category::Place),
            "object" => Some(Category::Object),
            "emotion" => Some(Category::Emotion),
            "fantasy" => Some(Category::Fantasy),
            "food" => Some(Category::Food),
            "work" => Some(Category::Work),
            "family" => Some(Category::Family),
            _ => None,
        }
    }
}

/// Requested difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Look up a difficulty by its request tag; unknown tags are skipped
    pub fn from_tag(tag: &str) -> Option<Difficulty> {
        match tag {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Inbound request body, shared by both generation endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Category tag (optional, skipped when unrecognized)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Difficulty tag (optional, skipped when unrecognized)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Number of odai to generate (optional, endpoint-specific default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Free-text keyword/theme to weave into the odai (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

/// Validated generation parameters passed down to the adapters
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Recognized category, if any
    pub category: Option<Category>,
    /// Recognized difficulty, if any
    pub difficulty: Option<Difficulty>,
    /// Number of odai to request, already validated to 1..=10
    pub count: u32,
    /// Non-empty keyword, if any
    pub keyword: Option<String>,
}

/// Successful generation payload for a single provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdaiData {
    /// Parsed odai, in model output order
    pub odais: Vec<String>,
    /// Provider that produced them
    pub source: ProviderId,
    /// Model identifier actually used
    pub model: String,
    /// Total token usage, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
}

/// Response envelope for `POST /generate/{provider}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Always `true`; failures use the error envelope instead
    pub success: bool,
    /// Generation payload
    pub data: OdaiData,
}

impl GenerateResponse {
    /// Wrap a generation payload in the success envelope
    pub fn new(data: OdaiData) -> Self {
        Self { success: true, data }
    }
}

/// Merged odai lists for the aggregate endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateData {
    /// Odai from OpenAI (empty when that provider failed)
    pub openai: Vec<String>,
    /// Odai from Claude (empty when that provider failed)
    pub claude: Vec<String>,
    /// Odai from Gemini (empty when that provider failed)
    pub gemini: Vec<String>,
    /// Sum of the three list lengths
    pub total_count: usize,
}

impl AggregateData {
    /// Mutable access to one provider's slot
    pub fn slot_mut(&mut self, provider: ProviderId) -> &mut Vec<String> {
        match provider {
            ProviderId::OpenAi => &mut self.openai,
            ProviderId::Claude => &mut self.claude,
            ProviderId::Gemini => &mut self.gemini,
        }
    }
}

/// Per-provider error messages for the aggregate endpoint
///
/// Only failed providers carry a message; the whole map is omitted from
/// the success envelope when it is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini: Option<String>,
}

impl ProviderErrors {
    /// Record a failure message for one provider
    pub fn insert(&mut self, provider: ProviderId, message: String) {
        match provider {
            ProviderId::OpenAi => self.openai = Some(message),
            ProviderId::Claude => self.claude = Some(message),
            ProviderId::Gemini => self.gemini = Some(message),
        }
    }

    /// Read one provider's failure message
    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::OpenAi => self.openai.as_deref(),
            ProviderId::Claude => self.claude.as_deref(),
            ProviderId::Gemini => self.gemini.as_deref(),
        }
    }

    /// Number of failed providers
    pub fn len(&self) -> usize {
        [&self.openai, &self.claude, &self.gemini]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// True when no provider failed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Response envelope for `POST /generate-all`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAllResponse {
    /// Always `true`; total failure uses the error envelope instead
    pub success: bool,
    /// Merged per-provider odai lists
    pub data: AggregateData,
    /// Failure messages, present only when at least one provider failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ProviderErrors>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_parse() {
        assert_eq!(ProviderId::parse("openai"), Some(ProviderId::OpenAi));
        assert_eq!(ProviderId::parse("claude"), Some(ProviderId::Claude));
        assert_eq!(ProviderId::parse("gemini"), Some(ProviderId::Gemini));
        assert_eq!(ProviderId::parse("OpenAI"), None);
        assert_eq!(ProviderId::parse("mistral"), None);
    }

    #[test]
    fn test_provider_id_serializes_lowercase() {
        let json = serde_json::to_string(&ProviderId::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
    }

    #[test]
    fn test_category_from_tag() {
        assert_eq!(Category::from_tag("wordplay"), Some(Category::Wordplay));
        assert_eq!(Category::from_tag("family"), Some(Category::Family));
        // Unknown tags are skipped, never an error
        assert_eq!(Category::from_tag("sports"), None);
        assert_eq!(Category::from_tag(""), None);
    }

    #[test]
    fn test_generate_request_wire_names() {
        let body = r#"{"category":"daily","count":5,"customPrompt":"cats"}"#;
        let request: GenerateRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.category.as_deref(), Some("daily"));
        assert_eq!(request.count, Some(5));
        assert_eq!(request.custom_prompt.as_deref(), Some("cats"));
        assert!(request.difficulty.is_none());
    }

    #[test]
    fn test_aggregate_data_wire_names() {
        let data = AggregateData {
            openai: vec!["a".to_string()],
            claude: vec![],
            gemini: vec!["b".to_string(), "c".to_string()],
            total_count: 3,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["openai"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_provider_errors_omitted_when_absent() {
        let mut errors = ProviderErrors::default();
        assert!(errors.is_empty());

        errors.insert(ProviderId::Claude, "API_RATE_LIMIT".to_string());
        assert!(!errors.is_empty());
        assert_eq!(errors.get(ProviderId::Claude), Some("API_RATE_LIMIT"));
        assert_eq!(errors.get(ProviderId::OpenAi), None);

        let json = serde_json::to_value(&errors).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("claude"));
    }
}

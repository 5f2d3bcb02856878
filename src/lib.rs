//! Odai Generator Library
//!
//! Generates oogiri odai (creative prompts) through OpenAI, Claude and
//! Gemini in parallel

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{GenerationParams, OdaiData, ProviderId};
pub use services::OdaiGenerator;
pub use utils::error::{ApiError, ApiResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}

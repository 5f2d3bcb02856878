//! Generation endpoint handlers
//!
//! Validates requests, dispatches them to the generation service and
//! maps failures onto the wire error envelope

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::handlers::AppState;
use crate::models::{
    Category, Difficulty, GenerateAllResponse, GenerateRequest, GenerateResponse,
    GenerationParams, ProviderId,
};
use crate::services::aggregator;
use crate::utils::error::{ApiError, ApiResult};

/// Default odai count for the single-provider endpoint
const DEFAULT_COUNT: i64 = 5;

/// Default odai count for the aggregate endpoint
const DEFAULT_COUNT_ALL: i64 = 3;

/// Handle single-provider generation requests
///
/// POST /generate/{provider}
pub async fn generate_odai(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateResponse>> {
    let provider = match ProviderId::parse(&provider) {
        Some(provider) => provider,
        None => {
            warn!("Unknown provider requested: {}", provider);
            return Err(ApiError::UnknownProvider(provider));
        }
    };

    let request = read_body(body)?;
    let params = build_params(request, DEFAULT_COUNT)?;

    debug!("Generation request: provider={}, count={}", provider, params.count);

    let data = state.generator.generate(provider, &params).await?;

    Ok(Json(GenerateResponse::new(data)))
}

/// Handle aggregate generation requests
///
/// POST /generate-all
pub async fn generate_all_odai(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateAllResponse>> {
    let request = read_body(body)?;
    let params = build_params(request, DEFAULT_COUNT_ALL)?;

    debug!("Aggregate generation request: count={}", params.count);

    let outcome = aggregator::generate_all(Arc::clone(&state.generator), params).await;

    if outcome.all_failed() {
        return Err(ApiError::AllProvidersFailed(outcome.errors));
    }

    let errors = if outcome.errors.is_empty() {
        None
    } else {
        Some(outcome.errors)
    };

    Ok(Json(GenerateAllResponse {
        success: true,
        data: outcome.data,
        errors,
    }))
}

/// Reject GET on the single-provider endpoint
///
/// Unknown providers still answer 404 so the two methods agree.
pub async fn generate_method_not_allowed(
    Path(provider): Path<String>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let provider = match ProviderId::parse(&provider) {
        Some(provider) => provider,
        None => return Err(ApiError::UnknownProvider(provider)),
    };

    Ok((
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({
            "message": format!("{} API endpoint - Use POST method", provider.display_name())
        })),
    ))
}

/// Reject GET on the aggregate endpoint
pub async fn generate_all_method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({
            "message": "Generate-all API endpoint - Use POST method"
        })),
    )
}

/// Unwrap the JSON body, treating unreadable bodies as internal errors
fn read_body(body: Result<Json<GenerateRequest>, JsonRejection>) -> ApiResult<GenerateRequest> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            warn!("Failed to read request body: {}", rejection);
            Err(ApiError::Internal)
        }
    }
}

/// Validate a request into generation parameters
fn build_params(request: GenerateRequest, default_count: i64) -> ApiResult<GenerationParams> {
    let count = request.count.unwrap_or(default_count);
    if !(1..=10).contains(&count) {
        return Err(ApiError::Validation(
            "Count must be between 1 and 10".to_string(),
        ));
    }

    Ok(GenerationParams {
        category: request.category.as_deref().and_then(Category::from_tag),
        difficulty: request.difficulty.as_deref().and_then(Difficulty::from_tag),
        count: count as u32,
        keyword: request.custom_prompt.filter(|keyword| !keyword.is_empty()),
    })
}

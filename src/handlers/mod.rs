//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod generate;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::OdaiGenerator;
use anyhow::Result;
use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub generator: Arc<OdaiGenerator>,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    // Create generation service
    let generator = Arc::new(OdaiGenerator::new(settings.clone())?);

    // Create application state
    let app_state = Arc::new(AppState {
        settings,
        generator,
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Create routes
    let router = Router::new()
        .route(
            "/generate/:provider",
            post(generate::generate_odai).get(generate::generate_method_not_allowed),
        )
        .route(
            "/generate-all",
            post(generate::generate_all_odai).get(generate::generate_all_method_not_allowed),
        )
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}

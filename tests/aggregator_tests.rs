//! Aggregation integration tests
//!
//! Exercises the provider fan-out against mocked provider APIs

use httpmock::prelude::*;
use odaigen::config::settings::{
    LoggingConfig, ProviderConfig, RequestConfig, ServerConfig, Settings,
};
use odaigen::models::{GenerationParams, OdaiData, ProviderId};
use odaigen::services::{generate_all, settle_all, OdaiGenerator};
use odaigen::utils::error::GenerationError;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn params() -> GenerationParams {
    GenerationParams {
        category: None,
        difficulty: None,
        count: 2,
        keyword: None,
    }
}

fn mock_settings(base: &str, claude_keyed: bool) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8090,
        },
        openai: ProviderConfig {
            api_key: Some("test-key".to_string()),
            base_url: base.to_string(),
        },
        claude: ProviderConfig {
            api_key: claude_keyed.then(|| "test-key".to_string()),
            base_url: base.to_string(),
        },
        gemini: ProviderConfig {
            api_key: Some("test-key".to_string()),
            base_url: base.to_string(),
        },
        request: RequestConfig { timeout: 5 },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
        },
    }
}

#[tokio::test]
async fn test_generate_all_queries_providers_concurrently() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .delay(Duration::from_millis(200))
                .json_body(json!({
                    "choices": [{"message": {"content": "目覚まし時計の最後の願いとは？"}}],
                    "model": "gpt-4o-mini"
                }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200)
                .delay(Duration::from_millis(200))
                .json_body(json!({
                    "content": [{"type": "text", "text": "エレベーターの中だけで流行している遊びとは？"}],
                    "model": "claude-3-7-sonnet-latest"
                }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/models/gemini-2.0-flash:generateContent");
            then.status(200)
                .delay(Duration::from_millis(200))
                .json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "消しゴムが夜中に消しているものとは？"}]}}]
                }));
        })
        .await;

    let generator =
        Arc::new(OdaiGenerator::new(mock_settings(&server.base_url(), true)).unwrap());

    let started = Instant::now();
    let outcome = generate_all(generator, params()).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.data.total_count, 3);
    assert!(outcome.errors.is_empty());
    assert!(
        elapsed < Duration::from_millis(500),
        "providers were queried sequentially in {elapsed:?}"
    );
}

#[tokio::test]
async fn test_settled_order_ignores_completion_order() {
    // Reversed delays so the last provider finishes first
    let settled = settle_all(|provider| async move {
        let delay = match provider {
            ProviderId::OpenAi => 150,
            ProviderId::Claude => 100,
            ProviderId::Gemini => 50,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        Ok::<OdaiData, GenerationError>(OdaiData {
            odais: vec!["順番待ちの行列で起きた事件とは？".to_string()],
            source: provider,
            model: "test-model".to_string(),
            tokens: None,
        })
    })
    .await;

    let order: Vec<ProviderId> = settled.iter().map(|(provider, _)| *provider).collect();
    assert_eq!(
        order,
        vec![ProviderId::OpenAi, ProviderId::Claude, ProviderId::Gemini]
    );
}

#[tokio::test]
async fn test_generate_all_merges_mixed_outcomes() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{"message": {"content": "1. 犬の反省文の書き出しとは？\n2. 皿洗いロボットの隠し機能とは？"}}],
                "model": "gpt-4o-mini",
                "usage": {"total_tokens": 40}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/models/gemini-2.0-flash:generateContent");
            then.status(500).json_body(json!({
                "error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}
            }));
        })
        .await;

    // Claude stays keyless and must fail without a network call
    let generator =
        Arc::new(OdaiGenerator::new(mock_settings(&server.base_url(), false)).unwrap());

    let outcome = generate_all(generator, params()).await;

    assert!(!outcome.all_failed());
    assert_eq!(outcome.data.total_count, 2);
    assert_eq!(outcome.data.openai.len(), 2);
    assert!(outcome.data.claude.is_empty());
    assert!(outcome.data.gemini.is_empty());

    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(
        outcome.errors.get(ProviderId::Claude),
        Some("ANTHROPIC_API_KEY is not configured")
    );
    assert_eq!(
        outcome.errors.get(ProviderId::Gemini),
        Some("Gemini API error: Internal error encountered.")
    );
}

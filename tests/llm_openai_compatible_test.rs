// ABOUTME: Integration tests for the OpenAI-compatible provider and the LLM-backed oracle
// ABOUTME: Uses an in-process chat-completions server to check request shape and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use async_trait::async_trait;
use helpers::mock_server::MockServer;
use std::sync::Arc;
use std::time::Duration;
use workout_architect::config::{LlmConfig, LlmProviderType};
use workout_architect::errors::{AppError, ErrorCode, OracleError};
use workout_architect::llm::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use workout_architect::models::ConversationTurn;
use workout_architect::planning::{LlmOracle, Oracle, OracleCall, OutputSchema};

fn completion(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
    })
    .to_string()
}

fn provider_for(server: &MockServer) -> OpenAiCompatibleProvider {
    common::init_test_logging();
    OpenAiCompatibleProvider::new(
        OpenAiCompatibleConfig::openai("sk-test", "gpt-4o-mini").with_base_url(server.url("/v1")),
    )
    .unwrap()
}

fn llm_config(timeout_secs: u64) -> LlmConfig {
    LlmConfig {
        provider: LlmProviderType::OpenAi,
        model: "gpt-4o-mini".to_owned(),
        timeout_secs,
        ..LlmConfig::default()
    }
}

async fn complete_error(status: u16, body: &str) -> AppError {
    let server = MockServer::start(status, body).await;
    provider_for(&server)
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err()
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn test_completion_is_parsed() {
    let server = MockServer::start(200, completion("Squats, lunges, bridges.")).await;
    let provider = provider_for(&server);

    let response = provider
        .complete(&ChatRequest::new(vec![ChatMessage::user("Plan legs")]).with_temperature(0.2))
        .await
        .unwrap();

    assert_eq!(response.content, "Squats, lunges, bridges.");
    assert_eq!(response.model, "gpt-4o-mini");
    assert_eq!(response.usage.unwrap().total_tokens, 160);
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));

    let requests = server.requests();
    assert_eq!(requests[0].path, "/v1/chat/completions");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer sk-test"));
    let body = requests[0].json();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["stream"], false);
    assert!(body.get("response_format").is_none());
}

#[tokio::test]
async fn test_json_mode_sets_response_format() {
    let server = MockServer::start(200, completion("{}")).await;

    provider_for(&server)
        .complete(&ChatRequest::new(vec![ChatMessage::user("json please")]).with_json_mode())
        .await
        .unwrap();

    let body = server.requests()[0].json();
    assert_eq!(body["response_format"]["type"], "json_object");
}

#[tokio::test]
async fn test_error_statuses_map_to_error_codes() {
    let auth = complete_error(401, r#"{"error": {"message": "Incorrect API key", "type": "invalid_request_error"}}"#).await;
    assert_eq!(auth.code, ErrorCode::ExternalAuthFailed);
    assert!(auth.message.contains("Incorrect API key"));

    let limited = complete_error(429, r#"{"error": {"message": "Slow down"}}"#).await;
    assert_eq!(limited.code, ErrorCode::ExternalRateLimited);

    let down = complete_error(503, "upstream unavailable").await;
    assert_eq!(down.code, ErrorCode::ExternalServiceUnavailable);

    let other = complete_error(500, "boom").await;
    assert_eq!(other.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_unparseable_completion_is_serialization_error() {
    let error = complete_error(200, r#"{"unexpected": true}"#).await;
    assert_eq!(error.code, ErrorCode::SerializationError);
}

// ============================================================================
// Oracle
// ============================================================================

#[tokio::test]
async fn test_oracle_sends_instructions_history_and_input() {
    let server = MockServer::start(200, completion(r#"{"focus_areas": ["legs"]}"#)).await;
    let oracle = LlmOracle::new(Arc::new(provider_for(&server)), &llm_config(5));
    let history = [
        ConversationTurn::user("legs"),
        ConversationTurn::assistant("How long, and where?"),
    ];
    let call = OracleCall::new(
        "Extract constraints.",
        "45 minutes at home",
        OutputSchema::Json {
            name: "constraints",
            description: "fields: focus_areas",
        },
    )
    .with_context(&history);

    let reply = oracle.call(&call).await.unwrap();
    assert_eq!(reply, r#"{"focus_areas": ["legs"]}"#);

    let body = server.requests()[0].json();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .contains("fields: focus_areas"));
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[3]["content"], "45 minutes at home");
    assert_eq!(body["response_format"]["type"], "json_object");
}

#[tokio::test]
async fn test_oracle_maps_rejection_and_empty_content() {
    let server = MockServer::start(401, r#"{"error": {"message": "bad key"}}"#).await;
    let oracle = LlmOracle::new(Arc::new(provider_for(&server)), &llm_config(5));
    let call = OracleCall::new("Plan.", "Design my workout now.", OutputSchema::Text);
    assert!(matches!(
        oracle.call(&call).await,
        Err(OracleError::Rejected(_))
    ));

    let server = MockServer::start(200, completion("   ")).await;
    let oracle = LlmOracle::new(Arc::new(provider_for(&server)), &llm_config(5));
    assert_eq!(oracle.call(&call).await, Err(OracleError::EmptyResponse));
}

#[tokio::test]
async fn test_instructions_become_user_turn_without_system_role() {
    common::init_test_logging();
    let server = MockServer::start(200, completion("Squats.")).await;
    let mut config =
        OpenAiCompatibleConfig::ollama("llama3.1").with_base_url(server.url("/v1"));
    config.capabilities = LlmCapabilities::empty();
    let provider = OpenAiCompatibleProvider::new(config).unwrap();
    let oracle = LlmOracle::new(Arc::new(provider), &llm_config(5));
    let call = OracleCall::new(
        "Extract constraints.",
        "legs",
        OutputSchema::Json {
            name: "constraints",
            description: "fields: focus_areas",
        },
    );

    oracle.call(&call).await.unwrap();

    let body = server.requests()[0].json();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .starts_with("Extract constraints."));
    assert_eq!(messages[1]["content"], "legs");
    assert!(body.get("response_format").is_none());
}

/// Provider that never answers within a test's patience
struct StalledProvider;

#[async_trait]
impl LlmProvider for StalledProvider {
    fn name(&self) -> &'static str {
        "stalled"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only()
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(AppError::internal("unreachable"))
    }
}

#[tokio::test]
async fn test_oracle_call_is_bounded_by_timeout() {
    let oracle = LlmOracle::new(Arc::new(StalledProvider), &llm_config(1));
    let call = OracleCall::new("Plan.", "Design my workout now.", OutputSchema::Text);

    let result = oracle.call(&call).await;

    assert_eq!(result, Err(OracleError::Timeout { secs: 1 }));
}

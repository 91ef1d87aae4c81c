// ABOUTME: OpenAI-compatible chat-completions provider for cloud and local endpoints
// ABOUTME: Supports OpenAI, Ollama, vLLM, and any endpoint speaking the same wire format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Generic implementation for any `OpenAI`-compatible LLM endpoint. The same
//! client talks to the hosted `OpenAI` API and to local servers such as
//! Ollama or vLLM; only the base URL, key and capability set differ.
//!
//! ## Supported Backends
//!
//! - **`OpenAI`**: <https://api.openai.com/v1>
//! - **Ollama**: <http://localhost:11434/v1>
//! - **vLLM**: <http://localhost:8000/v1>
//!
//! ## Example
//!
//! ```rust,no_run
//! use workout_architect::llm::{
//!     ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
//! };
//! use workout_architect::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::ollama("llama3.1"))?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Suggest a warm-up.")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::{LlmConfig, LlmProviderType};
use crate::constants::endpoints;
use crate::errors::{AppError, ErrorCode};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 15;

/// Default request timeout when none is configured
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

/// `response_format` object requesting JSON output
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: String,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: &'static str,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
    /// Overall request timeout
    pub request_timeout: Duration,
}

impl OpenAiCompatibleConfig {
    /// Create configuration for the hosted `OpenAI` API
    #[must_use]
    pub fn openai(api_key: impl Into<String>, model: &str) -> Self {
        Self {
            base_url: endpoints::OPENAI_API_BASE.to_owned(),
            api_key: Some(api_key.into()),
            default_model: model.to_owned(),
            provider_name: "openai",
            display_name: "OpenAI",
            capabilities: LlmCapabilities::chat_completions(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Create configuration for a local Ollama instance
    #[must_use]
    pub fn ollama(model: &str) -> Self {
        Self {
            base_url: endpoints::OLLAMA_API_BASE.to_owned(),
            api_key: None,
            default_model: model.to_owned(),
            provider_name: "ollama",
            display_name: "Ollama (Local)",
            capabilities: LlmCapabilities::chat_completions(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Build the provider configuration from the application's LLM settings
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        let base = match config.provider {
            LlmProviderType::OpenAi => {
                Self::openai(config.api_key.clone().unwrap_or_default(), &config.model)
            }
            LlmProviderType::Local => Self::ollama(&config.model),
        };
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            request_timeout: Duration::from_secs(config.timeout_secs),
            ..base
        }
    }

    /// Replace the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            "Initializing {} provider: base_url={}, model={}",
            config.display_name, config.base_url, config.default_model
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Log message details for debugging LLM interactions
    fn log_messages_debug(messages: &[OpenAiMessage], provider_name: &str, json_mode: bool) {
        for (i, msg) in messages.iter().enumerate() {
            debug!(
                "Message[{i}] role={}, content_len={}",
                msg.role,
                msg.content.len()
            );
        }
        debug!(
            "Sending chat completion request to {provider_name} with {} messages, json_mode={json_mode}",
            messages.len()
        );
    }

    /// Parse error response from API
    fn parse_error_response(&self, status: reqwest::StatusCode, body: &str) -> AppError {
        let service = self.config.display_name;
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| {
                let error_type = parsed.error.error_type.unwrap_or_else(|| "unknown".to_owned());
                format!("{error_type} - {}", parsed.error.message)
            },
        );

        match status.as_u16() {
            401 | 403 => AppError::auth_invalid(format!("API authentication failed: {detail}")),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("LLM rate limit reached: {detail}"),
            ),
            502..=504 => AppError::external_unavailable(
                service,
                format!("Server is not responding ({status}): {detail}"),
            ),
            _ => AppError::external_service(service, format!("API error ({status}): {detail}")),
        }
    }

    /// Map a transport failure onto an `AppError`
    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to send request to {}: {}", self.config.provider_name, e);
        if e.is_connect() {
            AppError::external_unavailable(
                self.config.display_name,
                format!("Cannot connect to server at {}", self.config.base_url),
            )
        } else if e.is_timeout() {
            AppError::external_unavailable(self.config.display_name, "Request timed out")
        } else {
            AppError::external_service(self.config.display_name, format!("Failed to connect: {e}"))
        }
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let json_mode = request.json_mode && self.config.capabilities.supports_json_mode();
        let messages: Vec<OpenAiMessage> = request.messages.iter().map(OpenAiMessage::from).collect();
        Self::log_messages_debug(&messages, self.config.provider_name, json_mode);

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages,
            temperature: request.temperature,
            response_format: json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
            stream: false,
        };

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {}", e);
            AppError::external_service(
                self.config.display_name,
                format!("Failed to read response: {e}"),
            )
        })?;

        if !status.is_success() {
            return Err(self.parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            AppError::new(
                ErrorCode::SerializationError,
                format!("Failed to parse response: {e}"),
            )
        })?;

        let choice = openai_response.choices.into_iter().next().ok_or_else(|| {
            AppError::external_service(self.config.display_name, "API returned no choices")
        })?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received response from {}: {} chars, finish_reason: {:?}",
            self.config.provider_name,
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: if openai_response.model.is_empty() {
                model.to_owned()
            } else {
                openai_response.model
            },
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

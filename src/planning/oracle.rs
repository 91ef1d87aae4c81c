// ABOUTME: Narrow text-understanding interface used by extraction and composition
// ABOUTME: Adapts any LlmProvider with a bounded timeout and parses structured JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Oracle
//!
//! The only non-deterministic collaborator of the pipeline. Both LLM steps go
//! through [`Oracle::call`], so tests can swap in a stub that returns canned
//! constraints or plan text.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::LlmConfig;
use crate::errors::OracleError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{ConversationTurn, Speaker};

/// Shape of the output requested from the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSchema {
    /// A single JSON object
    Json {
        /// Schema name, used in logs
        name: &'static str,
        /// One-line description of the expected object
        description: &'static str,
    },
    /// Free text
    Text,
}

/// One oracle invocation: instructions, prior conversation, new input
#[derive(Debug, Clone)]
pub struct OracleCall {
    /// System instructions
    pub instructions: String,
    /// Earlier turns, oldest first
    pub context: Vec<ConversationTurn>,
    /// The message to answer
    pub input: String,
    /// Requested output shape
    pub schema: OutputSchema,
}

impl OracleCall {
    /// Create a call without conversation context
    #[must_use]
    pub fn new(instructions: impl Into<String>, input: impl Into<String>, schema: OutputSchema) -> Self {
        Self {
            instructions: instructions.into(),
            context: Vec::new(),
            input: input.into(),
            schema,
        }
    }

    /// Attach prior conversation turns
    #[must_use]
    pub fn with_context(mut self, context: &[ConversationTurn]) -> Self {
        self.context = context.to_vec();
        self
    }
}

/// Text-understanding capability
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Answer `call`, returning the raw text produced
    async fn call(&self, call: &OracleCall) -> Result<String, OracleError>;
}

/// Call the oracle and deserialize its JSON answer into `T`
///
/// # Errors
///
/// Returns the oracle's own error, or `MalformedOutput` when no JSON object
/// conforming to `T` can be found in the answer
pub async fn structured_call<T: DeserializeOwned>(
    oracle: &dyn Oracle,
    call: &OracleCall,
) -> Result<T, OracleError> {
    let raw = oracle.call(call).await?;
    let json = extract_json(&raw).ok_or_else(|| {
        OracleError::MalformedOutput("no JSON object found in oracle output".to_owned())
    })?;
    serde_json::from_str(json).map_err(|e| {
        warn!(
            schema = ?call.schema,
            "Oracle output does not match the requested schema: {}",
            e
        );
        OracleError::MalformedOutput(e.to_string())
    })
}

/// Extract a JSON object from model output that might contain extra text
///
/// Tries the whole text, then a fenced ```json block, then the outermost
/// `{ ... }` span.
#[must_use]
pub fn extract_json(response: &str) -> Option<&str> {
    let trimmed = response.trim();
    if is_json_object(trimmed) {
        return Some(trimmed);
    }

    if let Some(start) = trimmed.find("```json") {
        let body = &trimmed[start + 7..];
        if let Some(end) = body.find("```") {
            let block = body[..end].trim();
            if is_json_object(block) {
                return Some(block);
            }
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end)
        .then(|| &trimmed[start..=end])
        .filter(|candidate| is_json_object(candidate))
}

fn is_json_object(text: &str) -> bool {
    matches!(
        serde_json::from_str::<serde_json::Value>(text),
        Ok(serde_json::Value::Object(_))
    )
}

// ============================================================================
// LLM-backed Oracle
// ============================================================================

/// Oracle answered by an [`LlmProvider`]
pub struct LlmOracle {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl LlmOracle {
    /// Create an oracle using the configured model, temperature and timeout
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn build_request(&self, call: &OracleCall) -> ChatRequest {
        let mut instructions = call.instructions.clone();
        let json_mode = matches!(call.schema, OutputSchema::Json { .. })
            && self.provider.capabilities().supports_json_mode();
        if let OutputSchema::Json { description, .. } = call.schema {
            instructions.push_str("\n\nRespond with a single JSON object: ");
            instructions.push_str(description);
        }

        let mut messages = Vec::with_capacity(call.context.len() + 2);
        if self.provider.capabilities().supports_system_messages() {
            messages.push(ChatMessage::system(instructions));
        } else {
            messages.push(ChatMessage::user(instructions));
        }
        messages.extend(call.context.iter().map(|turn| match turn.speaker {
            Speaker::User => ChatMessage::user(turn.text.clone()),
            Speaker::Assistant => ChatMessage::assistant(turn.text.clone()),
        }));
        messages.push(ChatMessage::user(call.input.clone()));

        let request = ChatRequest::new(messages)
            .with_model(self.model.clone())
            .with_temperature(self.temperature);
        if json_mode {
            request.with_json_mode()
        } else {
            request
        }
    }
}

#[async_trait]
impl Oracle for LlmOracle {
    #[instrument(skip(self, call), fields(provider = self.provider.name(), schema = ?call.schema))]
    async fn call(&self, call: &OracleCall) -> Result<String, OracleError> {
        let request = self.build_request(call);
        let response = tokio::time::timeout(self.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| OracleError::Timeout {
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| OracleError::from_provider(&e))?;

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Oracle call completed"
            );
        }

        if response.content.trim().is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        Ok(response.content)
    }
}

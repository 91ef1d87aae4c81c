// ABOUTME: Converts a free-text workout request into ParsedConstraints via the oracle
// ABOUTME: Never fails: oracle problems degrade to a generic clarification question
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use tracing::{debug, warn};

use super::oracle::{structured_call, Oracle, OracleCall, OutputSchema};
use crate::constants::{limits, messages};
use crate::llm::prompts::get_input_parser_prompt;
use crate::models::{ConversationTurn, ParsedConstraints};

const CONSTRAINTS_SCHEMA: OutputSchema = OutputSchema::Json {
    name: "parsed_constraints",
    description: "focus_areas, time_available_minutes, tiredness_level, location, \
                  equipment_mentioned, clarification_needed, clarification_question, \
                  processed_summary",
};

/// Constraint extraction step
pub struct ConstraintExtractor {
    oracle: Arc<dyn Oracle>,
}

impl ConstraintExtractor {
    /// Create an extractor backed by `oracle`
    #[must_use]
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Extract constraints from a single, context-free request
    pub async fn extract(&self, raw_query: &str) -> ParsedConstraints {
        self.extract_with_history(raw_query, &[]).await
    }

    /// Extract constraints, letting earlier turns fill in what the query omits.
    ///
    /// Only the most recent turns are forwarded. The essential-field
    /// invariant is recomputed locally whatever the oracle claims.
    pub async fn extract_with_history(
        &self,
        raw_query: &str,
        history: &[ConversationTurn],
    ) -> ParsedConstraints {
        let query = raw_query.trim();
        if query.is_empty() {
            return ParsedConstraints {
                clarification_needed: true,
                clarification_question: Some(messages::EMPTY_QUERY_PROMPT.to_owned()),
                ..ParsedConstraints::default()
            };
        }

        let recent = &history[history.len().saturating_sub(limits::MAX_CONTEXT_TURNS)..];
        let call = OracleCall::new(get_input_parser_prompt(), query, CONSTRAINTS_SCHEMA)
            .with_context(recent);

        match structured_call::<ParsedConstraints>(self.oracle.as_ref(), &call).await {
            Ok(parsed) => {
                let parsed = parsed.enforce_invariants();
                debug!(
                    clarification_needed = parsed.clarification_needed,
                    missing = ?parsed.missing_essentials(),
                    "Constraints extracted"
                );
                parsed
            }
            Err(e) => {
                warn!(error = %e, "Constraint extraction failed, asking for clarification");
                ParsedConstraints::fallback(raw_query)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OracleError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingOracle {
        reply: Result<String, OracleError>,
        calls: Mutex<Vec<OracleCall>>,
    }

    #[async_trait]
    impl Oracle for RecordingOracle {
        async fn call(&self, call: &OracleCall) -> Result<String, OracleError> {
            self.calls.lock().unwrap().push(call.clone());
            self.reply.clone()
        }
    }

    fn oracle(reply: Result<String, OracleError>) -> Arc<RecordingOracle> {
        Arc::new(RecordingOracle {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_blank_query_skips_oracle() {
        let stub = oracle(Ok("{}".to_owned()));
        let parsed = ConstraintExtractor::new(stub.clone()).extract("   ").await;
        assert!(parsed.clarification_needed);
        assert_eq!(
            parsed.clarification_question.as_deref(),
            Some(messages::EMPTY_QUERY_PROMPT)
        );
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_truncated_to_recent_turns() {
        let stub = oracle(Ok(r#"{"focus_areas": ["legs"]}"#.to_owned()));
        let history: Vec<ConversationTurn> = (0..30)
            .map(|i| ConversationTurn::user(format!("turn {i}")))
            .collect();
        let _ = ConstraintExtractor::new(stub.clone())
            .extract_with_history("legs", &history)
            .await;
        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls[0].context.len(), limits::MAX_CONTEXT_TURNS);
        assert_eq!(calls[0].context[0].text, "turn 20");
    }

    #[tokio::test]
    async fn test_oracle_failure_falls_back() {
        let stub = oracle(Err(OracleError::Timeout { secs: 60 }));
        let parsed = ConstraintExtractor::new(stub).extract("legs at the gym").await;
        assert!(parsed.clarification_needed);
        assert_eq!(parsed.processed_summary.as_deref(), Some("legs at the gym"));
    }
}

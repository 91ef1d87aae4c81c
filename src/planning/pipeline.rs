// ABOUTME: Turn-level coordinator sequencing extraction, mapping, catalog lookup and composition
// ABOUTME: Owns the clarification short-circuit, failure recovery and the transcript append
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Planner
//!
//! One call to [`WorkoutPlanner::handle_turn`] runs one conversational turn:
//!
//! ```text
//! Extracting ─┬─> ClarifyAndStop
//!             └─> Mapping ─> Fetching ─┬─> NoResultsAndStop
//!                                      └─> Composing ─> Done
//! ```
//!
//! Every terminal state appends exactly one user/assistant pair to the
//! transcript. The planner holds no per-conversation state and can serve
//! concurrent turns.

use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info_span, warn, Instrument};
use uuid::Uuid;

use super::composer::PlanComposer;
use super::extractor::ConstraintExtractor;
use super::mapper::IdentifierMapper;
use super::oracle::{LlmOracle, Oracle};
use crate::config::{AppConfig, CatalogConfig};
use crate::constants::messages;
use crate::errors::AppResult;
use crate::external::ExerciseCatalog;
use crate::llm::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use crate::logging::AppLogger;
use crate::models::{ConversationTurn, Transcript, FALLBACK_CLARIFICATION_QUESTION};

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalState {
    /// An essential constraint was missing; the response is a question
    ClarifyAndStop,
    /// The catalog found nothing or failed; the response is an apology
    NoResultsAndStop,
    /// A plan was composed
    Done,
    /// An unexpected internal failure was caught at the boundary
    Failed,
}

impl TerminalState {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClarifyAndStop => "clarify_and_stop",
            Self::NoResultsAndStop => "no_results_and_stop",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Text shown to the user
    pub response: String,
    /// Input transcript extended with (query, response)
    pub transcript: Transcript,
    /// Terminal state reached
    pub terminal: TerminalState,
}

/// Orchestrates one planning turn
pub struct WorkoutPlanner {
    extractor: ConstraintExtractor,
    mapper: IdentifierMapper,
    catalog: Arc<dyn ExerciseCatalog>,
    composer: PlanComposer,
}

impl WorkoutPlanner {
    /// Wire the pipeline stages around a shared oracle and catalog
    #[must_use]
    pub fn new(
        oracle: Arc<dyn Oracle>,
        catalog: Arc<dyn ExerciseCatalog>,
        config: &CatalogConfig,
    ) -> Self {
        Self {
            extractor: ConstraintExtractor::new(oracle.clone()),
            mapper: IdentifierMapper::from_config(config),
            catalog,
            composer: PlanComposer::new(oracle),
        }
    }

    /// Wire the production oracle (configured LLM provider) around `catalog`
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM `HTTP` client cannot be built
    pub fn from_config(config: &AppConfig, catalog: Arc<dyn ExerciseCatalog>) -> AppResult<Self> {
        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(&config.llm))?;
        let oracle = Arc::new(LlmOracle::new(Arc::new(provider), &config.llm));
        Ok(Self::new(oracle, catalog, &config.catalog))
    }

    /// Replace the identifier mapper
    #[must_use]
    pub fn with_mapper(mut self, mapper: IdentifierMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Run one turn.
    ///
    /// Never fails: clarification, empty results, remote errors and even
    /// panics inside a stage end in a user-facing sentence, and the returned
    /// transcript is always two turns longer than `transcript`.
    pub async fn handle_turn(&self, query: &str, transcript: Transcript) -> TurnOutcome {
        let started = Instant::now();
        let span = info_span!("planner_turn", turn_id = %Uuid::new_v4());

        let (response, terminal) = async {
            AssertUnwindSafe(self.run_stages(query, transcript.turns()))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    error!(reason = %panic_reason(panic.as_ref()), "Planner turn panicked");
                    (
                        format!("{}.", messages::UNEXPECTED_FAILURE_PREFIX),
                        TerminalState::Failed,
                    )
                })
        }
        .instrument(span.clone())
        .await;

        let transcript = transcript.with_exchange(query, response.clone());
        span.in_scope(|| {
            AppLogger::log_turn_outcome(
                terminal.as_str(),
                transcript.len(),
                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            );
        });

        TurnOutcome {
            response,
            transcript,
            terminal,
        }
    }

    async fn run_stages(
        &self,
        query: &str,
        history: &[ConversationTurn],
    ) -> (String, TerminalState) {
        let constraints = self.extractor.extract_with_history(query, history).await;
        if constraints.clarification_needed {
            let question = constraints
                .clarification_question
                .unwrap_or_else(|| FALLBACK_CLARIFICATION_QUESTION.to_owned());
            return (question, TerminalState::ClarifyAndStop);
        }

        let filter = self.mapper.map(&constraints);
        let candidates = match self.catalog.query(&filter).await {
            Ok(records) if records.is_empty() => {
                return (
                    messages::NO_EXERCISES_FOUND.to_owned(),
                    TerminalState::NoResultsAndStop,
                );
            }
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Exercise catalog lookup failed");
                return (e.user_message().to_owned(), TerminalState::NoResultsAndStop);
            }
        };

        let plan = self.composer.compose(&constraints, &candidates).await;
        (plan, TerminalState::Done)
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

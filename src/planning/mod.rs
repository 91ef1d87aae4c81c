// ABOUTME: Workout planning pipeline: oracle seam, extraction, mapping, composition, orchestration
// ABOUTME: Re-exports the stage types used by the binaries and the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planning
//!
//! Stages, leaf first:
//! - [`oracle`]: the text-understanding seam and its LLM adapter
//! - [`extractor`]: free text to [`ParsedConstraints`](crate::models::ParsedConstraints)
//! - [`mapper`]: constraints to catalog ids
//! - [`composer`]: constraints plus candidates to plan text
//! - [`pipeline`]: the per-turn coordinator

pub mod composer;
pub mod extractor;
pub mod mapper;
pub mod oracle;
pub mod pipeline;

pub use composer::{format_candidates, PlanComposer, SessionBudget};
pub use extractor::ConstraintExtractor;
pub use mapper::{IdentifierMapper, IdentifierTables, LocationKind};
pub use oracle::{structured_call, LlmOracle, Oracle, OracleCall, OutputSchema};
pub use pipeline::{TerminalState, TurnOutcome, WorkoutPlanner};

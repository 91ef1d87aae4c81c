// ABOUTME: Main library entry point for the Workout Architect planner
// ABOUTME: Exposes the planning pipeline, its collaborators, and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy.
#![deny(unsafe_code)]

//! # Workout Architect
//!
//! A conversational assistant that turns a free-text fitness request into a
//! single-session workout plan. Each turn runs a strictly sequential pipeline:
//!
//! 1. **Extraction**: an LLM turns the request (plus prior turns) into
//!    `ParsedConstraints`, or asks for the missing essentials
//! 2. **Mapping**: focus areas, equipment and location become numeric
//!    exercise-catalog ids
//! 3. **Lookup**: candidate exercises are fetched from the wger catalog and
//!    normalized
//! 4. **Composition**: the LLM selects exercises from the candidates and
//!    assigns volume, warm-up and cool-down
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workout_architect::config::AppConfig;
//! use workout_architect::external::WgerClient;
//! use workout_architect::llm::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
//! use workout_architect::models::Transcript;
//! use workout_architect::planning::{LlmOracle, WorkoutPlanner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(&config.llm))?;
//!     let oracle = Arc::new(LlmOracle::new(Arc::new(provider), &config.llm));
//!     let catalog = Arc::new(WgerClient::new(config.catalog.clone())?);
//!     let planner = WorkoutPlanner::new(oracle, catalog, &config.catalog);
//!
//!     let outcome = planner
//!         .handle_turn("Legs for 45 minutes at the gym", Transcript::new())
//!         .await;
//!     println!("{}", outcome.response);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by binary crates (src/bin/) and integration tests (tests/).

/// Configuration loaded once at process start
pub mod config;

/// Application constants and default values
pub mod constants;

/// Unified error types (re-exported from `workout-core`)
pub mod errors;

/// Exercise catalog client and record normalization
pub mod external;

/// LLM provider abstraction and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Conversation, constraint, and exercise models (re-exported from `workout-core`)
pub mod models;

/// Constraint extraction, identifier mapping, plan composition, and orchestration
pub mod planning;

/// HTTP routes for the planner API
pub mod routes;

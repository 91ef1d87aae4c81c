// ABOUTME: Re-export of the conversation, constraint, and exercise models from workout-core
// ABOUTME: Keeps `crate::models::*` paths stable for the binaries and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Transcript`: caller-owned, append-only conversation history
//! - `ParsedConstraints`: structured request extracted from free text
//! - `CatalogFilter`: numeric query understood by the exercise catalog
//! - `ExerciseRecord`: normalized, single-locale exercise

pub use workout_core::models::*;

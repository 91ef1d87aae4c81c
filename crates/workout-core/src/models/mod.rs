// ABOUTME: Core data models shared across the workout planner
// ABOUTME: Re-exports transcript, constraint, and exercise types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod constraints;
mod conversation;
mod exercise;

pub use constraints::{
    clarification_question_for, EnergyLevel, EssentialField, ParsedConstraints,
    FALLBACK_CLARIFICATION_QUESTION,
};
pub use conversation::{ConversationTurn, Speaker, Transcript};
pub use exercise::{CatalogFilter, ExerciseRecord, ENGLISH_LANGUAGE_ID, MAX_CATALOG_LIMIT};

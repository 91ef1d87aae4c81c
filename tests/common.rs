// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, a scripted oracle, and planner construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `workout_architect`

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use workout_architect::{
    config::CatalogConfig,
    errors::OracleError,
    external::ExerciseCatalog,
    planning::{Oracle, OracleCall, WorkoutPlanner},
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Oracle that answers with a scripted sequence of replies
///
/// Every call is recorded. Once the script is exhausted the oracle returns
/// `EmptyResponse`.
#[derive(Default)]
pub struct StubOracle {
    replies: Mutex<VecDeque<Result<String, OracleError>>>,
    calls: Mutex<Vec<OracleCall>>,
}

impl StubOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn fail(self, error: OracleError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Oracle for StubOracle {
    async fn call(&self, call: &OracleCall) -> Result<String, OracleError> {
        self.calls.lock().unwrap().push(call.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(OracleError::EmptyResponse))
    }
}

/// Oracle that panics on every call
pub struct PanickingOracle;

#[async_trait]
impl Oracle for PanickingOracle {
    async fn call(&self, _call: &OracleCall) -> Result<String, OracleError> {
        panic!("oracle exploded");
    }
}

/// Constraints JSON for a complete request
pub fn complete_constraints_json(focus: &[&str], minutes: u32, location: &str, tiredness: &str) -> String {
    serde_json::json!({
        "focus_areas": focus,
        "time_available_minutes": minutes,
        "tiredness_level": tiredness,
        "location": location,
        "equipment_mentioned": null,
        "clarification_needed": false,
        "clarification_question": null,
        "processed_summary": format!("User wants a {minutes} minute workout at the {location}.")
    })
    .to_string()
}

/// Build a planner over the given oracle and catalog with default catalog settings
pub fn planner(oracle: Arc<dyn Oracle>, catalog: Arc<dyn ExerciseCatalog>) -> WorkoutPlanner {
    WorkoutPlanner::new(oracle, catalog, &CatalogConfig::default())
}

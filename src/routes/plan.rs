// ABOUTME: Planning route: runs one conversational turn over HTTP
// ABOUTME: Accepts a query plus the caller-held transcript and returns the extended transcript
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::constants::limits;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::models::Transcript;
use crate::planning::{TerminalState, WorkoutPlanner};

/// Body of `POST /api/plan`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The user's message for this turn
    pub query: String,
    /// Conversation so far; empty for a new conversation
    #[serde(default)]
    pub transcript: Transcript,
}

/// Reply of `POST /api/plan`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Text to show the user
    pub response: String,
    /// Transcript to send back on the next turn
    pub transcript: Transcript,
    /// How the turn ended
    pub outcome: TerminalState,
}

/// Planning routes implementation
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the planning route
    pub fn routes(planner: Arc<WorkoutPlanner>) -> Router {
        Router::new()
            .route("/api/plan", post(Self::plan_turn))
            .with_state(planner)
    }

    /// Run one planner turn
    async fn plan_turn(
        State(planner): State<Arc<WorkoutPlanner>>,
        Json(request): Json<PlanRequest>,
    ) -> Result<Json<PlanResponse>, AppError> {
        let started = Instant::now();
        let query_chars = request.query.chars().count();
        if query_chars > limits::MAX_QUERY_CHARS {
            return Err(AppError::invalid_input(format!(
                "Query is {query_chars} characters long; the limit is {}",
                limits::MAX_QUERY_CHARS
            )));
        }

        let outcome = planner
            .handle_turn(&request.query, request.transcript)
            .await;

        AppLogger::log_api_request(
            "POST",
            "/api/plan",
            200,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok(Json(PlanResponse {
            response: outcome.response,
            transcript: outcome.transcript,
            outcome: outcome.terminal,
        }))
    }
}

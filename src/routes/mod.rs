// ABOUTME: Route module organization for the Workout Architect HTTP API
// ABOUTME: Assembles health and planning routes with request tracing and a body size limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Handlers are thin: they validate input and delegate to
//! [`WorkoutPlanner`](crate::planning::WorkoutPlanner).

/// Health check routes
pub mod health;
/// Planning turn routes
pub mod plan;

pub use health::HealthRoutes;
pub use plan::{PlanRequest, PlanResponse, PlanRoutes};

use axum::Router;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::planning::WorkoutPlanner;

/// Largest accepted request body, transcript included
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Build the full application router
pub fn router(planner: Arc<WorkoutPlanner>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(PlanRoutes::routes(planner))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

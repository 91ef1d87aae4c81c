// ABOUTME: External exercise catalog client modules (wger REST API)
// ABOUTME: Defines the catalog lookup seam plus the HTTP and mock implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! The planner depends on [`ExerciseCatalog`] only. [`WgerClient`] queries the
//! public wger `API`; [`MockExerciseCatalog`] serves canned exercises for
//! tests and offline runs.

pub mod wger_client;
pub mod wger_models;

pub use wger_client::{MockExerciseCatalog, WgerClient};
pub use wger_models::{clean_description, WgerExercise, WgerExerciseInfoResponse};

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::models::{CatalogFilter, ExerciseRecord};

/// Typed remote exercise search
///
/// An empty vector is a successful lookup that found nothing; it is never
/// reported as an error.
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Fetch and normalize the exercises matching `filter`
    async fn query(&self, filter: &CatalogFilter) -> Result<Vec<ExerciseRecord>, CatalogError>;
}

// ABOUTME: wger REST API client for exercise search by muscle, equipment, and category
// ABOUTME: Maps transport, status, and schema failures onto the catalog error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! wger Exercise Catalog Client
//!
//! Wraps one `GET /exerciseinfo/` call per lookup. Results are normalized
//! into [`ExerciseRecord`]s and never cached.
//!
//! # API Reference
//! wger `REST API`: <https://wger.de/api/v2/>
//!
//! # Example
//! ```rust,no_run
//! use workout_architect::config::CatalogConfig;
//! use workout_architect::external::{ExerciseCatalog, WgerClient};
//! use workout_architect::models::CatalogFilter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WgerClient::new(CatalogConfig::default())?;
//! let mut filter = CatalogFilter::new(2, 10);
//! filter.category_id = Some(9);
//! let exercises = client.query(&filter).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::wger_models::{
    WgerCategory, WgerEquipment, WgerExercise, WgerExerciseInfoResponse, WgerMuscle,
    WgerTranslation,
};
use super::ExerciseCatalog;
use crate::config::CatalogConfig;
use crate::constants::{defaults, endpoints, limits, service_names};
use crate::errors::{AppError, CatalogError};
use crate::logging::AppLogger;
use crate::models::{CatalogFilter, ExerciseRecord};

/// wger `API` client
pub struct WgerClient {
    config: CatalogConfig,
    http_client: reqwest::Client,
}

impl WgerClient {
    /// Create a new client with a bounded request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: CatalogConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Full URL of the exercise search resource
    #[must_use]
    pub fn exercise_info_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoints::WGER_EXERCISE_INFO_PATH
        )
    }

    /// Query parameters for `filter`; list filters repeat their key
    #[must_use]
    pub fn query_params(filter: &CatalogFilter) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("language", filter.language_id.to_string()),
            ("limit", filter.limit().to_string()),
            ("offset", filter.offset.to_string()),
            ("status", defaults::CATALOG_APPROVED_STATUS.to_string()),
        ];
        if let Some(category) = filter.category_id {
            params.push(("category", category.to_string()));
        }
        params.extend(filter.muscle_ids.iter().map(|id| ("muscles", id.to_string())));
        params.extend(
            filter
                .equipment_ids
                .iter()
                .map(|id| ("equipment", id.to_string())),
        );
        params
    }

    async fn fetch(&self, filter: &CatalogFilter) -> Result<Vec<ExerciseRecord>, CatalogError> {
        let mut request = self
            .http_client
            .get(self.exercise_info_url())
            .header("Accept", "application/json")
            .query(&Self::query_params(filter));
        if let Some(ref api_key) = self.config.api_key {
            request = request.header("Authorization", format!("Token {api_key}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::unavailable(format!(
                    "request timed out after {}s",
                    self.config.timeout_secs
                ))
            } else {
                CatalogError::unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::unavailable(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            let detail: String = body
                .chars()
                .take(limits::ERROR_BODY_PREVIEW_CHARS)
                .collect();
            warn!(status = %status, "{} rejected exercise query", service_names::WGER);
            return Err(CatalogError::rejected(status.as_u16(), detail));
        }

        let parsed: WgerExerciseInfoResponse = serde_json::from_str(&body)
            .map_err(|e| CatalogError::malformed(e.to_string()))?;

        debug!(
            returned = parsed.results.len(),
            total = ?parsed.count,
            "{} exercise query succeeded",
            service_names::WGER
        );
        Ok(parsed.into_records(filter.language_id))
    }
}

#[async_trait]
impl ExerciseCatalog for WgerClient {
    #[instrument(
        skip(self, filter),
        fields(
            muscles = ?filter.muscle_ids,
            equipment = ?filter.equipment_ids,
            category = ?filter.category_id,
        )
    )]
    async fn query(&self, filter: &CatalogFilter) -> Result<Vec<ExerciseRecord>, CatalogError> {
        let started = Instant::now();
        let result = self.fetch(filter).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_catalog_query(
            &format!("{filter:?}"),
            result.as_ref().map_or(0, Vec::len),
            result.is_ok(),
            elapsed_ms,
        );
        result
    }
}

// ============================================================================
// Mock Catalog
// ============================================================================

/// Mock exercise catalog for testing and offline use (no API calls)
///
/// Holds raw multi-locale exercises and applies the same filter semantics
/// as the remote catalog: an exercise matches when it hits any requested
/// muscle (primary or secondary), any requested equipment, and the category.
pub struct MockExerciseCatalog {
    exercises: Vec<WgerExercise>,
    failure: Option<CatalogError>,
    queries: Mutex<Vec<CatalogFilter>>,
}

impl MockExerciseCatalog {
    /// Create a mock with the built-in exercise set
    #[must_use]
    pub fn new() -> Self {
        Self::with_exercises(default_exercises())
    }

    /// Create a mock serving the given raw exercises
    #[must_use]
    pub fn with_exercises(exercises: Vec<WgerExercise>) -> Self {
        Self {
            exercises,
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that never finds anything
    #[must_use]
    pub fn empty() -> Self {
        Self::with_exercises(Vec::new())
    }

    /// Create a mock whose every query fails with `error`
    #[must_use]
    pub fn failing(error: CatalogError) -> Self {
        Self {
            failure: Some(error),
            ..Self::empty()
        }
    }

    /// Filters received so far, in order
    pub async fn recorded_queries(&self) -> Vec<CatalogFilter> {
        self.queries.lock().await.clone()
    }

    fn matches(exercise: &WgerExercise, filter: &CatalogFilter) -> bool {
        let muscle_hit = filter.muscle_ids.is_empty()
            || exercise
                .muscles
                .iter()
                .chain(&exercise.muscles_secondary)
                .any(|m| filter.muscle_ids.contains(&m.id));
        let equipment_hit = filter.equipment_ids.is_empty()
            || exercise
                .equipment
                .iter()
                .any(|e| filter.equipment_ids.contains(&e.id));
        let category_hit = filter
            .category_id
            .map_or(true, |id| exercise.category.id == id);
        muscle_hit && equipment_hit && category_hit
    }
}

impl Default for MockExerciseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExerciseCatalog for MockExerciseCatalog {
    async fn query(&self, filter: &CatalogFilter) -> Result<Vec<ExerciseRecord>, CatalogError> {
        self.queries.lock().await.push(filter.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(self
            .exercises
            .iter()
            .filter(|exercise| Self::matches(exercise, filter))
            .skip(filter.offset as usize)
            .take(filter.limit() as usize)
            .map(|exercise| exercise.normalize(filter.language_id))
            .collect())
    }
}

/// Build a raw English exercise for the mock catalog
#[must_use]
pub fn mock_exercise(
    id: u32,
    name: &str,
    description: &str,
    category: (u32, &str),
    primary: &[(u32, &str)],
    secondary: &[(u32, &str)],
    equipment: &[(u32, &str)],
) -> WgerExercise {
    let muscle = |&(id, name): &(u32, &str)| WgerMuscle {
        id,
        name: name.to_owned(),
        name_en: Some(name.to_owned()),
        is_front: true,
    };
    WgerExercise {
        id,
        uuid: format!("mock-{id}"),
        translations: vec![WgerTranslation {
            name: name.to_owned(),
            description: format!("<p>{description}</p>"),
            language: crate::models::ENGLISH_LANGUAGE_ID,
        }],
        category: WgerCategory {
            id: category.0,
            name: category.1.to_owned(),
        },
        muscles: primary.iter().map(muscle).collect(),
        muscles_secondary: secondary.iter().map(muscle).collect(),
        equipment: equipment
            .iter()
            .map(|&(id, name)| WgerEquipment {
                id,
                name: name.to_owned(),
            })
            .collect(),
    }
}

fn default_exercises() -> Vec<WgerExercise> {
    const LEGS: (u32, &str) = (9, "Legs");
    const CHEST: (u32, &str) = (11, "Chest");
    const BACK: (u32, &str) = (12, "Back");
    const ARMS: (u32, &str) = (8, "Arms");
    const SHOULDERS: (u32, &str) = (13, "Shoulders");
    const ABS: (u32, &str) = (10, "Abs");
    const CALVES: (u32, &str) = (14, "Calves");

    const QUADS: (u32, &str) = (10, "Quadriceps");
    const HAMSTRINGS: (u32, &str) = (8, "Hamstrings");
    const GLUTES: (u32, &str) = (15, "Gluteus Maximus");
    const CHEST_M: (u32, &str) = (4, "Chest");
    const TRICEPS: (u32, &str) = (5, "Triceps");
    const BICEPS: (u32, &str) = (1, "Biceps");
    const LATS: (u32, &str) = (12, "Latissimus Dorsi");
    const DELTS: (u32, &str) = (2, "Shoulders");
    const ABDOMINALS: (u32, &str) = (6, "Abdominals");
    const CALF: (u32, &str) = (7, "Calves");

    const BARBELL: (u32, &str) = (1, "Barbell");
    const DUMBBELL: (u32, &str) = (3, "Dumbbell");
    const MAT: (u32, &str) = (4, "Gym mat");
    const PULL_UP_BAR: (u32, &str) = (6, "Pull-up bar");
    const BODYWEIGHT: (u32, &str) = (7, "none (bodyweight exercise)");
    const BENCH: (u32, &str) = (8, "Bench");

    vec![
        mock_exercise(
            111,
            "Barbell Back Squat",
            "Rest the bar on your upper back, sit down between your heels and drive back up.",
            LEGS,
            &[QUADS, GLUTES],
            &[HAMSTRINGS],
            &[BARBELL],
        ),
        mock_exercise(
            112,
            "Romanian Deadlift",
            "Hinge at the hips with soft knees, lower the bar along your legs, then stand tall.",
            LEGS,
            &[HAMSTRINGS, GLUTES],
            &[],
            &[BARBELL],
        ),
        mock_exercise(
            113,
            "Walking Lunges",
            "Step forward into a lunge, lower the back knee towards the floor and alternate legs.",
            LEGS,
            &[QUADS, GLUTES],
            &[HAMSTRINGS],
            &[BODYWEIGHT],
        ),
        mock_exercise(
            114,
            "Bodyweight Squat",
            "Feet shoulder width apart, sit back and down, keep the chest up.",
            LEGS,
            &[QUADS],
            &[GLUTES],
            &[BODYWEIGHT],
        ),
        mock_exercise(
            115,
            "Glute Bridge",
            "Lie on your back, feet flat, push through the heels and lift the hips.",
            LEGS,
            &[GLUTES],
            &[HAMSTRINGS],
            &[BODYWEIGHT, MAT],
        ),
        mock_exercise(
            211,
            "Bench Press",
            "Lower the bar to mid chest under control and press it back up.",
            CHEST,
            &[CHEST_M],
            &[TRICEPS, DELTS],
            &[BARBELL, BENCH],
        ),
        mock_exercise(
            212,
            "Push-Ups",
            "Hands under shoulders, body in a straight line, lower the chest to the floor.",
            CHEST,
            &[CHEST_M],
            &[TRICEPS],
            &[BODYWEIGHT],
        ),
        mock_exercise(
            213,
            "Dumbbell Fly",
            "Lying on a bench, open the arms in a wide arc and squeeze them back together.",
            CHEST,
            &[CHEST_M],
            &[],
            &[DUMBBELL, BENCH],
        ),
        mock_exercise(
            311,
            "Pull-Ups",
            "Hang from the bar and pull until the chin clears it.",
            BACK,
            &[LATS],
            &[BICEPS],
            &[PULL_UP_BAR],
        ),
        mock_exercise(
            411,
            "Dumbbell Biceps Curl",
            "Curl the dumbbells up without swinging the elbows.",
            ARMS,
            &[BICEPS],
            &[],
            &[DUMBBELL],
        ),
        mock_exercise(
            511,
            "Dumbbell Shoulder Press",
            "Press the dumbbells overhead from shoulder height.",
            SHOULDERS,
            &[DELTS],
            &[TRICEPS],
            &[DUMBBELL],
        ),
        mock_exercise(
            611,
            "Plank",
            "Hold a straight line from head to heels on your forearms.",
            ABS,
            &[ABDOMINALS],
            &[],
            &[BODYWEIGHT, MAT],
        ),
        mock_exercise(
            711,
            "Standing Calf Raises",
            "Rise onto the balls of your feet and lower slowly.",
            CALVES,
            &[CALF],
            &[],
            &[BODYWEIGHT],
        ),
    ]
}

// ABOUTME: Catalog filter and normalized exercise record types
// ABOUTME: Filter carries numeric catalog ids; records are the locale-resolved, markup-free view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound on records requested per catalog query
pub const MAX_CATALOG_LIMIT: u32 = 25;

/// Locale id of English in the exercise catalog
pub const ENGLISH_LANGUAGE_ID: u32 = 2;

/// Numeric filter understood by the exercise catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogFilter {
    /// Muscle ids (primary or secondary)
    pub muscle_ids: BTreeSet<u32>,
    /// Equipment ids; empty means no equipment restriction
    pub equipment_ids: BTreeSet<u32>,
    /// Broad exercise category
    pub category_id: Option<u32>,
    /// Pagination offset
    pub offset: u32,
    /// Locale id used for translations
    pub language_id: u32,
    limit: u32,
}

impl CatalogFilter {
    /// Create an unrestricted filter; `limit` is clamped to `1..=MAX_CATALOG_LIMIT`
    #[must_use]
    pub fn new(language_id: u32, limit: u32) -> Self {
        Self {
            muscle_ids: BTreeSet::new(),
            equipment_ids: BTreeSet::new(),
            category_id: None,
            offset: 0,
            language_id,
            limit: limit.clamp(1, MAX_CATALOG_LIMIT),
        }
    }

    /// Page size of the query
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Replace the page size, clamped to `1..=MAX_CATALOG_LIMIT`
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_CATALOG_LIMIT);
        self
    }

    /// Whether the filter restricts anything besides locale and paging
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.muscle_ids.is_empty() && self.equipment_ids.is_empty() && self.category_id.is_none()
    }
}

/// Exercise as presented to the plan composer.
///
/// Built fresh for every catalog query from the raw multi-locale record and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Catalog id
    pub id: u32,
    /// Name in the configured locale (or the first available one)
    pub display_name: String,
    /// Plain-text description
    pub description: String,
    /// Category name (e.g. "Legs")
    pub category_name: String,
    /// Primary muscles, English names when available
    pub primary_muscles: Vec<String>,
    /// Secondary muscles, English names when available
    pub secondary_muscles: Vec<String>,
    /// Required equipment names
    pub required_equipment: Vec<String>,
}

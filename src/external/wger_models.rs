// ABOUTME: Raw wger exercise payload types and their normalization into ExerciseRecord
// ABOUTME: Selects the configured locale, strips description markup, prefers English muscle names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! wger `/exerciseinfo/` payload
//!
//! The catalog returns every exercise with all of its translations. The
//! planner only ever sees the normalized [`ExerciseRecord`]: one locale,
//! plain-text description, flat name lists.

use crate::models::ExerciseRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Paginated `/exerciseinfo/` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WgerExerciseInfoResponse {
    /// Total number of matching exercises on the server
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// Exercises on this page
    pub results: Vec<WgerExercise>,
}

/// One translation of an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WgerTranslation {
    /// Localized name
    pub name: String,
    /// Localized HTML description
    #[serde(default)]
    pub description: String,
    /// Locale id
    pub language: u32,
}

/// Exercise category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WgerCategory {
    /// Category id
    pub id: u32,
    /// Category name
    pub name: String,
}

/// Muscle reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WgerMuscle {
    /// Muscle id
    pub id: u32,
    /// Latin or native name
    pub name: String,
    /// English name, when the catalog has one
    #[serde(default)]
    pub name_en: Option<String>,
    /// Whether the muscle is drawn on the front of the body
    #[serde(default)]
    pub is_front: bool,
}

/// Equipment reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WgerEquipment {
    /// Equipment id
    pub id: u32,
    /// Equipment name
    pub name: String,
}

/// Multi-locale exercise as returned by the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WgerExercise {
    /// Exercise id
    pub id: u32,
    /// Stable exercise uuid
    #[serde(default)]
    pub uuid: String,
    /// Per-locale names and descriptions
    #[serde(default)]
    pub translations: Vec<WgerTranslation>,
    /// Broad category
    pub category: WgerCategory,
    /// Primary muscles
    #[serde(default)]
    pub muscles: Vec<WgerMuscle>,
    /// Secondary muscles
    #[serde(default)]
    pub muscles_secondary: Vec<WgerMuscle>,
    /// Required equipment
    #[serde(default)]
    pub equipment: Vec<WgerEquipment>,
}

impl WgerMuscle {
    /// English name when present, otherwise the catalog name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name_en
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }
}

impl WgerExercise {
    /// Translation in `language_id`, falling back to the first translation
    #[must_use]
    pub fn translation(&self, language_id: u32) -> Option<&WgerTranslation> {
        self.translations
            .iter()
            .find(|t| t.language == language_id)
            .or_else(|| self.translations.first())
    }

    /// Build the single-locale record the planner works with
    #[must_use]
    pub fn normalize(&self, language_id: u32) -> ExerciseRecord {
        let translation = self.translation(language_id);
        ExerciseRecord {
            id: self.id,
            display_name: translation
                .map(|t| collapse_whitespace(&t.name))
                .unwrap_or_default(),
            description: translation
                .map(|t| clean_description(&t.description))
                .unwrap_or_default(),
            category_name: collapse_whitespace(&self.category.name),
            primary_muscles: self
                .muscles
                .iter()
                .map(|m| collapse_whitespace(m.display_name()))
                .collect(),
            secondary_muscles: self
                .muscles_secondary
                .iter()
                .map(|m| collapse_whitespace(m.display_name()))
                .collect(),
            required_equipment: self
                .equipment
                .iter()
                .map(|e| collapse_whitespace(&e.name))
                .collect(),
        }
    }

    /// Wrap an already-normalized record into a single-translation payload.
    ///
    /// Category, muscle and equipment ids are not kept on the record and are
    /// set to zero.
    #[must_use]
    pub fn from_record(record: &ExerciseRecord, language_id: u32) -> Self {
        let muscle = |name: &String| WgerMuscle {
            id: 0,
            name: name.clone(),
            name_en: Some(name.clone()),
            is_front: true,
        };
        Self {
            id: record.id,
            uuid: String::new(),
            translations: vec![WgerTranslation {
                name: record.display_name.clone(),
                description: record.description.clone(),
                language: language_id,
            }],
            category: WgerCategory {
                id: 0,
                name: record.category_name.clone(),
            },
            muscles: record.primary_muscles.iter().map(muscle).collect(),
            muscles_secondary: record.secondary_muscles.iter().map(muscle).collect(),
            equipment: record
                .required_equipment
                .iter()
                .map(|name| WgerEquipment {
                    id: 0,
                    name: name.clone(),
                })
                .collect(),
        }
    }
}

impl WgerExerciseInfoResponse {
    /// Normalize every exercise on the page
    #[must_use]
    pub fn into_records(self, language_id: u32) -> Vec<ExerciseRecord> {
        self.results
            .iter()
            .map(|exercise| exercise.normalize(language_id))
            .collect()
    }
}

// ============================================================================
// Markup Removal
// ============================================================================

/// Block-level tags that separate words
static BLOCK_TAG_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|br|li|ul|ol|div|h[1-6]|tr|td)\b[^>]*>").ok()
});

/// Any remaining tag
static TAG_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]+>").ok());

/// Convert an HTML description to plain text.
///
/// Entities are decoded, tags removed and whitespace collapsed. Passes are
/// repeated until the text is stable, so the result is a fixed point:
/// cleaning it again returns it unchanged.
#[must_use]
pub fn clean_description(raw: &str) -> String {
    let mut text = collapse_whitespace(raw);
    // A pass that changes the text always shortens it, so this terminates
    loop {
        let next = clean_once(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn clean_once(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    let spaced = BLOCK_TAG_PATTERN
        .as_ref()
        .map_or_else(|| decoded.to_string(), |re| re.replace_all(&decoded, " ").into_owned());
    let stripped = TAG_PATTERN
        .as_ref()
        .map_or_else(|| spaced.clone(), |re| re.replace_all(&spaced, "").into_owned());
    collapse_whitespace(&stripped)
}

/// Trim and collapse internal whitespace runs to single spaces
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ABOUTME: Deterministic translation of semantic constraints into numeric catalog ids
// ABOUTME: Fixed muscle, equipment and category tables plus colloquial aliases and location defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Identifier Mapper
//!
//! Pure, total mapping from [`ParsedConstraints`] to [`CatalogFilter`]. The
//! id tables mirror the catalog's vocabulary and are plain data: they can be
//! replaced through [`IdentifierTables`] when the live catalog disagrees.
//!
//! Resolution rules:
//! - a focus token naming a muscle adds its muscle id;
//! - otherwise a token naming a broad category sets the category (first wins);
//! - unknown tokens are dropped;
//! - with no resolved equipment, a home location restricts to bodyweight and
//!   a gym location leaves equipment unrestricted.

use tracing::debug;

use crate::config::CatalogConfig;
use crate::models::{CatalogFilter, ParsedConstraints};

/// Muscle name → catalog muscle id
pub const MUSCLE_IDS: &[(&str, u32)] = &[
    ("biceps", 1),
    ("shoulders", 2),
    ("serratus anterior", 3),
    ("chest", 4),
    ("triceps", 5),
    ("abdominals", 6),
    ("calves", 7),
    ("hamstrings", 8),
    ("adductors", 9),
    ("quadriceps", 10),
    ("trapezius", 11),
    ("latissimus dorsi", 12),
    ("obliques", 14),
    ("gluteus maximus", 15),
];

/// Equipment phrase → catalog equipment id
pub const EQUIPMENT_IDS: &[(&str, u32)] = &[
    ("barbell", 1),
    ("sz-bar", 2),
    ("dumbbell", 3),
    ("gym mat", 4),
    ("swiss ball", 5),
    ("pull-up bar", 6),
    ("bodyweight exercise", 7),
    ("bench", 8),
    ("incline bench", 9),
    ("kettlebell", 10),
];

/// Broad focus word → catalog category id
pub const CATEGORY_IDS: &[(&str, u32)] = &[
    ("abs", 10),
    ("arms", 8),
    ("back", 12),
    ("calves", 14),
    ("chest", 11),
    ("legs", 9),
    ("shoulders", 13),
];

/// Equipment id implied by training at home
pub const BODYWEIGHT_EQUIPMENT_ID: u32 = 7;

const MUSCLE_ALIASES: &[(&str, &str)] = &[
    ("bicep", "biceps"),
    ("tricep", "triceps"),
    ("delts", "shoulders"),
    ("deltoids", "shoulders"),
    ("shoulder", "shoulders"),
    ("pecs", "chest"),
    ("pectorals", "chest"),
    ("serratus", "serratus anterior"),
    ("core", "abdominals"),
    ("abdominal", "abdominals"),
    ("calf", "calves"),
    ("hams", "hamstrings"),
    ("hamstring", "hamstrings"),
    ("adductor", "adductors"),
    ("quads", "quadriceps"),
    ("quad", "quadriceps"),
    ("traps", "trapezius"),
    ("lats", "latissimus dorsi"),
    ("lat", "latissimus dorsi"),
    ("oblique", "obliques"),
    ("glutes", "gluteus maximus"),
    ("glute", "gluteus maximus"),
    ("butt", "gluteus maximus"),
];

const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("ab", "abs"),
    ("arm", "arms"),
    ("leg", "legs"),
    ("lower body", "legs"),
    ("upper back", "back"),
    ("lower back", "back"),
];

const EQUIPMENT_ALIASES: &[(&str, &str)] = &[
    ("barbells", "barbell"),
    ("ez bar", "sz-bar"),
    ("ez-bar", "sz-bar"),
    ("sz bar", "sz-bar"),
    ("dumbbells", "dumbbell"),
    ("db", "dumbbell"),
    ("mat", "gym mat"),
    ("yoga mat", "gym mat"),
    ("exercise ball", "swiss ball"),
    ("stability ball", "swiss ball"),
    ("pull up bar", "pull-up bar"),
    ("pullup bar", "pull-up bar"),
    ("chin-up bar", "pull-up bar"),
    ("bodyweight", "bodyweight exercise"),
    ("body weight", "bodyweight exercise"),
    ("no equipment", "bodyweight exercise"),
    ("none", "bodyweight exercise"),
    ("benches", "bench"),
    ("flat bench", "bench"),
    ("kettlebells", "kettlebell"),
];

/// Where a session takes place, as far as equipment defaults are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// No equipment assumed beyond bodyweight
    Home,
    /// Full equipment, no restriction
    Gym,
}

impl LocationKind {
    /// Classify a free-text location
    #[must_use]
    pub fn classify(location: &str) -> Option<Self> {
        let location = location.trim().to_lowercase();
        if location.contains("gym") || location.contains("fitness center") {
            Some(Self::Gym)
        } else if ["home", "house", "apartment", "hotel", "park", "outdoors", "outside"]
            .iter()
            .any(|word| location.contains(word))
        {
            Some(Self::Home)
        } else {
            None
        }
    }

    /// Equipment ids assumed when the user named none
    #[must_use]
    pub const fn default_equipment(self) -> &'static [u32] {
        match self {
            Self::Home => &[BODYWEIGHT_EQUIPMENT_ID],
            Self::Gym => &[],
        }
    }
}

/// Id vocabularies used by the mapper
#[derive(Debug, Clone, Copy)]
pub struct IdentifierTables {
    /// Muscle name → id
    pub muscles: &'static [(&'static str, u32)],
    /// Equipment phrase → id
    pub equipment: &'static [(&'static str, u32)],
    /// Category word → id
    pub categories: &'static [(&'static str, u32)],
}

impl Default for IdentifierTables {
    fn default() -> Self {
        Self {
            muscles: MUSCLE_IDS,
            equipment: EQUIPMENT_IDS,
            categories: CATEGORY_IDS,
        }
    }
}

/// Constraint to filter mapping step
#[derive(Debug, Clone)]
pub struct IdentifierMapper {
    tables: IdentifierTables,
    language_id: u32,
    page_limit: u32,
}

impl IdentifierMapper {
    /// Create a mapper using the built-in tables
    #[must_use]
    pub fn new(language_id: u32, page_limit: u32) -> Self {
        Self {
            tables: IdentifierTables::default(),
            language_id,
            page_limit,
        }
    }

    /// Create a mapper for the configured catalog locale and page size
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.language_id, config.page_limit)
    }

    /// Replace the id tables
    #[must_use]
    pub const fn with_tables(mut self, tables: IdentifierTables) -> Self {
        self.tables = tables;
        self
    }

    /// Build the catalog filter for `constraints`
    #[must_use]
    pub fn map(&self, constraints: &ParsedConstraints) -> CatalogFilter {
        let mut filter = CatalogFilter::new(self.language_id, self.page_limit);

        for token in tokens(constraints.focus_areas.iter().flatten()) {
            if let Some(id) = self.muscle_id(&token) {
                filter.muscle_ids.insert(id);
            } else if let Some(id) = self.category_id(&token) {
                match filter.category_id {
                    None => filter.category_id = Some(id),
                    Some(kept) if kept != id => {
                        debug!(token = %token, kept, dropped = id, "Extra category dropped");
                    }
                    Some(_) => {}
                }
            } else {
                debug!(token = %token, "Unmapped focus token dropped");
            }
        }

        for token in tokens(constraints.equipment_mentioned.iter().flatten()) {
            match self.equipment_id(&token) {
                Some(id) => {
                    filter.equipment_ids.insert(id);
                }
                None => debug!(token = %token, "Unmapped equipment dropped"),
            }
        }

        if filter.equipment_ids.is_empty() {
            if let Some(kind) = constraints
                .location
                .as_deref()
                .and_then(LocationKind::classify)
            {
                filter
                    .equipment_ids
                    .extend(kind.default_equipment().iter().copied());
            }
        }

        filter
    }

    fn muscle_id(&self, token: &str) -> Option<u32> {
        lookup(self.tables.muscles, MUSCLE_ALIASES, token)
    }

    fn category_id(&self, token: &str) -> Option<u32> {
        lookup(self.tables.categories, CATEGORY_ALIASES, token)
    }

    fn equipment_id(&self, token: &str) -> Option<u32> {
        lookup(self.tables.equipment, EQUIPMENT_ALIASES, token)
    }
}

fn lookup(table: &[(&str, u32)], aliases: &[(&str, &str)], token: &str) -> Option<u32> {
    let find = |key: &str| table.iter().find(|(name, _)| *name == key).map(|(_, id)| *id);
    find(token).or_else(|| {
        aliases
            .iter()
            .find(|(alias, _)| *alias == token)
            .and_then(|(_, canonical)| find(canonical))
    })
}

/// Split phrases like "chest and triceps" or "legs/glutes" into normalized tokens
fn tokens<'a>(phrases: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out = Vec::new();
    for phrase in phrases {
        let lowered = phrase.to_lowercase().replace(" and ", ",");
        for part in lowered.split([',', '&', '/', '+']) {
            let token = normalize_token(part);
            if !token.is_empty() && !out.contains(&token) {
                out.push(token);
            }
        }
    }
    out
}

fn normalize_token(raw: &str) -> String {
    let mut token = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    for prefix in ["my ", "a ", "the ", "some "] {
        if let Some(rest) = token.strip_prefix(prefix) {
            token = rest.to_owned();
        }
    }
    for suffix in [" workout", " day", " training", " exercises", " muscles"] {
        if let Some(rest) = token.strip_suffix(suffix) {
            token = rest.to_owned();
        }
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> IdentifierMapper {
        IdentifierMapper::new(2, 10)
    }

    fn with_focus(focus: &[&str], location: &str) -> ParsedConstraints {
        ParsedConstraints {
            focus_areas: Some(focus.iter().map(|f| (*f).to_owned()).collect()),
            time_available_minutes: Some(45),
            location: Some(location.to_owned()),
            ..ParsedConstraints::default()
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(MUSCLE_IDS.len(), 14);
        assert_eq!(EQUIPMENT_IDS.len(), 10);
        assert_eq!(CATEGORY_IDS.len(), 7);
    }

    #[test]
    fn test_every_alias_resolves() {
        for (alias, canonical) in MUSCLE_ALIASES {
            assert!(MUSCLE_IDS.iter().any(|(n, _)| n == canonical), "{alias}");
        }
        for (alias, canonical) in CATEGORY_ALIASES {
            assert!(CATEGORY_IDS.iter().any(|(n, _)| n == canonical), "{alias}");
        }
        for (alias, canonical) in EQUIPMENT_ALIASES {
            assert!(EQUIPMENT_IDS.iter().any(|(n, _)| n == canonical), "{alias}");
        }
    }

    #[test]
    fn test_muscle_wins_over_category() {
        let filter = mapper().map(&with_focus(&["chest and triceps"], "gym"));
        assert_eq!(filter.muscle_ids.iter().copied().collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(filter.category_id, None);
    }

    #[test]
    fn test_phrase_normalization() {
        assert_eq!(normalize_token("  my leg   workout "), "leg");
        let filter = mapper().map(&with_focus(&["Leg Day"], "gym"));
        assert_eq!(filter.category_id, Some(9));
    }

    #[test]
    fn test_location_classification() {
        assert_eq!(LocationKind::classify("Home"), Some(LocationKind::Home));
        assert_eq!(LocationKind::classify("hotel room"), Some(LocationKind::Home));
        assert_eq!(LocationKind::classify("the gym"), Some(LocationKind::Gym));
        assert_eq!(LocationKind::classify("home gym"), Some(LocationKind::Gym));
        assert_eq!(LocationKind::classify("office"), None);
    }
}

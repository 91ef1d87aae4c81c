// ABOUTME: Exhaustive tests for the identifier mapper tables and resolution policy
// ABOUTME: Covers muscle/category precedence, aliases, location defaults, and determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::BTreeSet;
use workout_architect::models::{ParsedConstraints, MAX_CATALOG_LIMIT};
use workout_architect::planning::mapper::{
    IdentifierMapper, IdentifierTables, CATEGORY_IDS, EQUIPMENT_IDS, MUSCLE_IDS,
};

fn mapper() -> IdentifierMapper {
    IdentifierMapper::new(2, 10)
}

fn constraints(focus: &[&str], location: &str, equipment: &[&str]) -> ParsedConstraints {
    ParsedConstraints {
        focus_areas: Some(focus.iter().map(|s| (*s).to_owned()).collect()),
        time_available_minutes: Some(45),
        location: Some(location.to_owned()),
        equipment_mentioned: (!equipment.is_empty())
            .then(|| equipment.iter().map(|s| (*s).to_owned()).collect()),
        ..ParsedConstraints::default()
    }
}

fn ids(set: &BTreeSet<u32>) -> Vec<u32> {
    set.iter().copied().collect()
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_every_muscle_entry_maps_to_its_id() {
    for (name, id) in MUSCLE_IDS {
        let filter = mapper().map(&constraints(&[*name], "gym", &[]));
        assert_eq!(ids(&filter.muscle_ids), vec![*id], "muscle {name}");
        assert_eq!(filter.category_id, None, "muscle {name}");
    }
}

#[test]
fn test_every_category_entry_maps_when_not_a_muscle() {
    for (name, id) in CATEGORY_IDS {
        let filter = mapper().map(&constraints(&[*name], "gym", &[]));
        if MUSCLE_IDS.iter().any(|(muscle, _)| muscle == name) {
            assert_eq!(filter.category_id, None, "category {name}");
            assert_eq!(filter.muscle_ids.len(), 1, "category {name}");
        } else {
            assert_eq!(filter.category_id, Some(*id), "category {name}");
            assert!(filter.muscle_ids.is_empty(), "category {name}");
        }
    }
}

#[test]
fn test_every_equipment_entry_maps_to_its_id() {
    for (name, id) in EQUIPMENT_IDS {
        let filter = mapper().map(&constraints(&["legs"], "home", &[*name]));
        assert_eq!(ids(&filter.equipment_ids), vec![*id], "equipment {name}");
    }
}

// ============================================================================
// Resolution Policy
// ============================================================================

#[test]
fn test_quadriceps_and_hamstrings() {
    let filter = mapper().map(&constraints(&["Quadriceps", "Hamstrings"], "gym", &[]));
    assert_eq!(ids(&filter.muscle_ids), vec![8, 10]);
    assert_eq!(filter.category_id, None);
    assert!(filter.equipment_ids.is_empty());
}

#[test]
fn test_legs_sets_category_only() {
    let filter = mapper().map(&constraints(&["legs"], "gym", &[]));
    assert_eq!(filter.category_id, Some(9));
    assert!(filter.muscle_ids.is_empty());
}

#[test]
fn test_first_category_wins() {
    let filter = mapper().map(&constraints(&["arms", "back"], "gym", &[]));
    assert_eq!(filter.category_id, Some(8));
}

#[test]
fn test_aliases_and_compound_phrases() {
    let filter = mapper().map(&constraints(&["Quads & Glutes", "lats/traps"], "gym", &[]));
    assert_eq!(ids(&filter.muscle_ids), vec![10, 11, 12, 15]);

    let filter = mapper().map(&constraints(&["legs"], "gym", &["Dumbbells", "a bench"]));
    assert_eq!(ids(&filter.equipment_ids), vec![3, 8]);
}

#[test]
fn test_unknown_tokens_are_dropped() {
    let filter = mapper().map(&constraints(&["upper body", "cardio"], "gym", &["rowing machine"]));
    assert!(filter.is_unrestricted());
}

// ============================================================================
// Location Defaults
// ============================================================================

#[test]
fn test_home_without_equipment_means_bodyweight() {
    let filter = mapper().map(&constraints(&["chest"], "home", &[]));
    assert_eq!(ids(&filter.equipment_ids), vec![7]);
}

#[test]
fn test_home_with_unknown_equipment_still_means_bodyweight() {
    let filter = mapper().map(&constraints(&["chest"], "home", &["resistance band"]));
    assert_eq!(ids(&filter.equipment_ids), vec![7]);
}

#[test]
fn test_home_with_known_equipment_keeps_it() {
    let filter = mapper().map(&constraints(&["arms"], "home", &["dumbbells"]));
    assert_eq!(ids(&filter.equipment_ids), vec![3]);
}

#[test]
fn test_gym_leaves_equipment_unrestricted() {
    let filter = mapper().map(&constraints(&["back"], "gym", &[]));
    assert!(filter.equipment_ids.is_empty());
}

// ============================================================================
// Filter Shape
// ============================================================================

#[test]
fn test_paging_and_locale() {
    let filter = IdentifierMapper::new(2, 500).map(&constraints(&["legs"], "gym", &[]));
    assert_eq!(filter.limit(), MAX_CATALOG_LIMIT);
    assert_eq!(filter.offset, 0);
    assert_eq!(filter.language_id, 2);
}

#[test]
fn test_mapping_is_deterministic() {
    let input = constraints(&["chest and triceps", "abs"], "home", &["mat", "dumbbell"]);
    let first = mapper().map(&input);
    for _ in 0..10 {
        assert_eq!(mapper().map(&input), first);
    }
}

#[test]
fn test_replacement_tables() {
    const LEGS_ELSEWHERE: &[(&str, u32)] = &[("legs", 42)];
    let tables = IdentifierTables {
        categories: LEGS_ELSEWHERE,
        ..IdentifierTables::default()
    };
    let filter = mapper()
        .with_tables(tables)
        .map(&constraints(&["legs"], "gym", &[]));
    assert_eq!(filter.category_id, Some(42));
}

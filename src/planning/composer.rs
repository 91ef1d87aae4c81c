// ABOUTME: Composes the final workout plan from constraints and catalog candidates
// ABOUTME: Computes the session budget in code and audits the plan against the candidate list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{info, warn};

use super::oracle::{Oracle, OracleCall, OutputSchema};
use crate::constants::{limits, messages};
use crate::llm::prompts::{render, PLAN_COMPOSER_TEMPLATE};
use crate::models::{EnergyLevel, ExerciseRecord, ParsedConstraints};

/// Exercise count and volume prescription for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBudget {
    /// Fewest exercises to select
    pub min_exercises: usize,
    /// Most exercises to select
    pub max_exercises: usize,
    /// Preferred count within the range
    pub target_exercises: usize,
    /// Sets per exercise
    pub sets: u32,
    /// Inclusive rep range per set
    pub rep_range: (u32, u32),
    /// Rest between sets
    pub rest_seconds: u32,
    /// Energy classification the budget was built for
    pub energy: EnergyLevel,
}

impl SessionBudget {
    /// Budget for a session of `minutes` at `energy`.
    ///
    /// Count by duration: up to 20 min 2-3, 21-49 min 3-4, 50 min and more
    /// 4-5, unknown 3-4. Low energy prefers the low end of the range and
    /// lighter volume; high energy the high end and heavier volume.
    #[must_use]
    pub const fn for_session(minutes: Option<u32>, energy: EnergyLevel) -> Self {
        let (min_exercises, max_exercises) = match minutes {
            Some(m) if m <= 20 => (2, 3),
            Some(m) if m >= 50 => (4, 5),
            _ => (3, 4),
        };
        let (target_exercises, sets, rep_range, rest_seconds) = match energy {
            EnergyLevel::Low => (min_exercises, 2, (8, 10), 90),
            EnergyLevel::Normal => (max_exercises, 3, (8, 12), 75),
            EnergyLevel::High => (max_exercises, 4, (6, 12), 60),
        };
        Self {
            min_exercises,
            max_exercises,
            target_exercises,
            sets,
            rep_range,
            rest_seconds,
            energy,
        }
    }

    /// Budget derived from parsed constraints
    #[must_use]
    pub fn from_constraints(constraints: &ParsedConstraints) -> Self {
        Self::for_session(constraints.time_available_minutes, constraints.energy_level())
    }

    /// Total working sets at the target count
    #[must_use]
    pub const fn total_sets(&self) -> u32 {
        self.target_exercises as u32 * self.sets
    }

    const fn energy_guidance(&self) -> &'static str {
        match self.energy {
            EnergyLevel::Low => {
                "The user is tired: favor simpler, lower-skill movements, keep the volume low \
                 and stop every set well short of failure."
            }
            EnergyLevel::Normal => {
                "The user has normal energy: standard volume and moderate effort are appropriate."
            }
            EnergyLevel::High => {
                "The user is energetic: compound movements and challenging effort are appropriate."
            }
        }
    }
}

/// Render candidates as a numbered, human-readable list
#[must_use]
pub fn format_candidates(candidates: &[ExerciseRecord]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(index, exercise)| format_candidate(index + 1, exercise))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

fn format_candidate(number: usize, exercise: &ExerciseRecord) -> String {
    let name = if exercise.display_name.is_empty() {
        "N/A"
    } else {
        &exercise.display_name
    };
    let mut details = format!("Exercise {number} (ID: {}):\n  Name: {name}\n", exercise.id);
    if !exercise.description.is_empty() {
        let _ = writeln!(
            details,
            "  Description: {}",
            preview(&exercise.description, limits::DESCRIPTION_PREVIEW_CHARS)
        );
    }
    if !exercise.category_name.is_empty() {
        let _ = writeln!(details, "  Category: {}", exercise.category_name);
    }
    if !exercise.primary_muscles.is_empty() {
        let _ = writeln!(
            details,
            "  Primary Muscles: {}",
            exercise.primary_muscles.join(", ")
        );
    }
    if !exercise.secondary_muscles.is_empty() {
        let _ = writeln!(
            details,
            "  Secondary Muscles: {}",
            exercise.secondary_muscles.join(", ")
        );
    }
    if exercise.required_equipment.is_empty() {
        details.push_str("  Equipment: Bodyweight or Unspecified");
    } else {
        let _ = write!(
            details,
            "  Equipment: {}",
            exercise.required_equipment.join(", ")
        );
    }
    details.trim().to_owned()
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_owned()
    }
}

/// Plan composition step
pub struct PlanComposer {
    oracle: Arc<dyn Oracle>,
}

impl PlanComposer {
    /// Create a composer backed by `oracle`
    #[must_use]
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Compose a plan using only `candidates`.
    ///
    /// An empty candidate list yields the fixed "no exercises" message
    /// without consulting the oracle. Oracle failures yield a fixed error
    /// sentence.
    pub async fn compose(
        &self,
        constraints: &ParsedConstraints,
        candidates: &[ExerciseRecord],
    ) -> String {
        if candidates.is_empty() {
            return messages::NO_EXERCISES_FOUND.to_owned();
        }

        let budget = SessionBudget::from_constraints(constraints);
        let instructions = build_prompt(constraints, candidates, &budget);
        let call = OracleCall::new(instructions, "Design my workout now.", OutputSchema::Text);

        match self.oracle.call(&call).await {
            Ok(plan) => {
                let named = candidates_named_in(&plan, candidates);
                if named == 0 {
                    warn!(
                        candidate_count = candidates.len(),
                        "Composed plan names none of the candidate exercises"
                    );
                }
                info!(
                    candidate_count = candidates.len(),
                    named_candidates = named,
                    target_exercises = budget.target_exercises,
                    "Workout plan composed"
                );
                plan.trim().to_owned()
            }
            Err(e) => {
                warn!(error = %e, "Plan composition failed");
                messages::COMPOSER_FAILURE.to_owned()
            }
        }
    }
}

fn build_prompt(
    constraints: &ParsedConstraints,
    candidates: &[ExerciseRecord],
    budget: &SessionBudget,
) -> String {
    let or_unspecified = |value: Option<String>| value.unwrap_or_else(|| "not specified".to_owned());
    let focus = or_unspecified(constraints.focus_areas.as_ref().map(|f| f.join(", ")));
    let time = or_unspecified(
        constraints
            .time_available_minutes
            .map(|m| format!("{m} minutes")),
    );
    let tiredness = or_unspecified(constraints.tiredness_level.clone());
    let location = or_unspecified(constraints.location.clone());
    let equipment = or_unspecified(constraints.equipment_mentioned.as_ref().map(|e| e.join(", ")));
    let summary = constraints
        .processed_summary
        .clone()
        .unwrap_or_else(|| constraints.describe());
    let min = budget.min_exercises.to_string();
    let max = budget.max_exercises.to_string();
    let target = budget.target_exercises.to_string();
    let sets = budget.sets.to_string();
    let reps = format!("{}-{}", budget.rep_range.0, budget.rep_range.1);
    let rest = budget.rest_seconds.to_string();
    let rendered_candidates = format_candidates(candidates);

    render(
        PLAN_COMPOSER_TEMPLATE,
        &[
            ("focus_areas", focus.as_str()),
            ("time_available", time.as_str()),
            ("tiredness_level", tiredness.as_str()),
            ("location", location.as_str()),
            ("equipment_mentioned", equipment.as_str()),
            ("summary", summary.as_str()),
            ("min_exercises", min.as_str()),
            ("max_exercises", max.as_str()),
            ("target_exercises", target.as_str()),
            ("sets", sets.as_str()),
            ("rep_range", reps.as_str()),
            ("rest_seconds", rest.as_str()),
            ("energy_guidance", budget.energy_guidance()),
            ("candidates", rendered_candidates.as_str()),
        ],
    )
}

/// Number of candidates whose name appears in `plan`, case-insensitively
fn candidates_named_in(plan: &str, candidates: &[ExerciseRecord]) -> usize {
    let plan = plan.to_lowercase();
    candidates
        .iter()
        .filter(|c| !c.display_name.is_empty() && plan.contains(&c.display_name.to_lowercase()))
        .count()
}

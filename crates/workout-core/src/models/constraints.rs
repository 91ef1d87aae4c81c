// ABOUTME: Structured workout constraints extracted from a free-text request
// ABOUTME: Enforces the essential-field / clarification invariant and classifies energy level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Write as _};

/// Question asked when the request could not be understood at all
pub const FALLBACK_CLARIFICATION_QUESTION: &str = "I had a little trouble understanding your \
request. Could you please rephrase or provide more details about your workout goals (focus, \
time, location, tiredness)?";

/// Fields whose absence forces a clarification turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EssentialField {
    /// Muscle groups or workout type
    FocusAreas,
    /// Session length in minutes
    TimeAvailable,
    /// Where the session takes place
    Location,
}

impl fmt::Display for EssentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocusAreas => f.write_str("focus_areas"),
            Self::TimeAvailable => f.write_str("time_available_minutes"),
            Self::Location => f.write_str("location"),
        }
    }
}

/// Self-reported energy, used to scale exercise count and volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Tired or low energy: fewer, simpler exercises and lower volume
    Low,
    /// Normal or unspecified
    #[default]
    Normal,
    /// Energetic: standard-to-harder volume
    High,
}

impl EnergyLevel {
    /// Classify a free-text tiredness level
    #[must_use]
    pub fn from_tiredness(tiredness: Option<&str>) -> Self {
        let Some(raw) = tiredness else {
            return Self::Normal;
        };
        let value = raw.trim().to_lowercase();
        if ["tired", "low energy", "exhausted", "fatigued", "sore", "sleepy"]
            .iter()
            .any(|word| value.contains(word))
        {
            Self::Low
        } else if ["energetic", "high energy", "pumped", "fresh"]
            .iter()
            .any(|word| value.contains(word))
        {
            Self::High
        } else {
            Self::Normal
        }
    }
}

/// Structured constraints for a single workout session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedConstraints {
    /// Main muscle groups or workout focus (e.g. `["legs"]`)
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
    /// Session duration in minutes
    #[serde(default, deserialize_with = "deserialize_lenient_minutes")]
    pub time_available_minutes: Option<u32>,
    /// Stated tiredness (e.g. "tired", "normal", "energetic")
    #[serde(default)]
    pub tiredness_level: Option<String>,
    /// Where the session happens (e.g. "gym", "home")
    #[serde(default)]
    pub location: Option<String>,
    /// Equipment the user mentioned (e.g. `["dumbbells"]`)
    #[serde(default)]
    pub equipment_mentioned: Option<Vec<String>>,
    /// True whenever an essential field is missing
    #[serde(default)]
    pub clarification_needed: bool,
    /// Question to ask, present exactly when `clarification_needed`
    #[serde(default)]
    pub clarification_question: Option<String>,
    /// Short restatement of what was understood
    #[serde(default, alias = "processed_query_for_next_step")]
    pub processed_summary: Option<String>,
}

impl ParsedConstraints {
    /// Constraints that only carry the generic clarification question.
    ///
    /// Used when the oracle failed; the raw query is kept as the summary.
    #[must_use]
    pub fn fallback(raw_query: &str) -> Self {
        Self {
            clarification_needed: true,
            clarification_question: Some(FALLBACK_CLARIFICATION_QUESTION.to_owned()),
            processed_summary: Some(raw_query.to_owned()),
            ..Self::default()
        }
    }

    /// Essential fields that are absent, in a stable order
    #[must_use]
    pub fn missing_essentials(&self) -> Vec<EssentialField> {
        let mut missing = Vec::new();
        if self.focus_areas.as_ref().map_or(true, Vec::is_empty) {
            missing.push(EssentialField::FocusAreas);
        }
        if self.time_available_minutes.map_or(true, |minutes| minutes == 0) {
            missing.push(EssentialField::TimeAvailable);
        }
        if self
            .location
            .as_deref()
            .map_or(true, |location| location.trim().is_empty())
        {
            missing.push(EssentialField::Location);
        }
        missing
    }

    /// Energy classification of `tiredness_level`
    #[must_use]
    pub fn energy_level(&self) -> EnergyLevel {
        EnergyLevel::from_tiredness(self.tiredness_level.as_deref())
    }

    /// Normalize values and re-derive the clarification fields.
    ///
    /// Blank strings and empty lists become `None`, a zero duration becomes
    /// `None`, duplicates are removed from the lists. `clarification_needed`
    /// is then recomputed from the essential fields; the question is kept
    /// (or generated) only when clarification is needed.
    #[must_use]
    pub fn enforce_invariants(mut self) -> Self {
        self.focus_areas = clean_list(self.focus_areas);
        self.equipment_mentioned = clean_list(self.equipment_mentioned);
        self.location = clean_text(self.location).map(|l| l.to_lowercase());
        self.tiredness_level = clean_text(self.tiredness_level).map(|t| t.to_lowercase());
        self.time_available_minutes = self.time_available_minutes.filter(|m| *m > 0);
        self.processed_summary = clean_text(self.processed_summary);

        let missing = self.missing_essentials();
        self.clarification_needed = !missing.is_empty();
        self.clarification_question = if self.clarification_needed {
            clean_text(self.clarification_question)
                .or_else(|| Some(clarification_question_for(&missing)))
        } else {
            None
        };
        if self.processed_summary.is_none() {
            self.processed_summary = Some(self.describe());
        }
        self
    }

    /// One-line description of the known constraints
    #[must_use]
    pub fn describe(&self) -> String {
        let focus = self
            .focus_areas
            .as_ref()
            .map_or_else(|| "general".to_owned(), |areas| areas.join(", "));
        let mut summary = match self.time_available_minutes {
            Some(minutes) => format!("User wants a {minutes} minute {focus} workout"),
            None => format!("User wants a {focus} workout"),
        };
        if let Some(location) = &self.location {
            let _ = write!(summary, " at the {location}");
        }
        if let Some(tiredness) = &self.tiredness_level {
            let _ = write!(summary, ", feeling {tiredness}");
        }
        summary.push('.');
        summary
    }
}

/// Build a question that asks only for the missing essential fields
#[must_use]
pub fn clarification_question_for(missing: &[EssentialField]) -> String {
    let focus = missing.contains(&EssentialField::FocusAreas);
    let time = missing.contains(&EssentialField::TimeAvailable);
    let location = missing.contains(&EssentialField::Location);
    match (focus, time, location) {
        (true, true, true) => "What would you like to focus on, how much time do you have, and \
                               will you be at the gym or at home?"
            .to_owned(),
        (true, true, false) => "What would you like to focus on, and how much time do you have?"
            .to_owned(),
        (true, false, true) => {
            "What would you like to focus on, and will you be at the gym or at home?".to_owned()
        }
        (true, false, false) => {
            "What muscle groups or type of workout would you like to focus on?".to_owned()
        }
        (false, true, true) => {
            "How much time do you have, and will you be at the gym or at home?".to_owned()
        }
        (false, true, false) => "How much time do you have for this workout?".to_owned(),
        (false, false, true) => "Will you be working out at the gym or at home?".to_owned(),
        (false, false, false) => FALLBACK_CLARIFICATION_QUESTION.to_owned(),
    }
}

/// Accept whole minutes written as an integer, an integral float, or a numeric
/// string. Anything else (negative, fractional, zero, non-numeric) reads as absent.
fn deserialize_lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(minutes_from_value))
}

fn minutes_from_value(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(number) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| number.as_f64().and_then(whole_minutes)),
        serde_json::Value::String(text) => {
            let text = text.trim();
            text.parse::<u32>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_minutes))
        }
        _ => None,
    }
    .filter(|minutes| *minutes > 0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_minutes(value: f64) -> Option<u32> {
    let whole = value.is_finite() && value.fract().abs() < f64::EPSILON;
    (whole && value > 0.0 && value <= f64::from(u32::MAX)).then(|| value as u32)
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    let mut cleaned: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        let value = value.trim().to_lowercase();
        if !value.is_empty() && !cleaned.contains(&value) {
            cleaned.push(value);
        }
    }
    (!cleaned.is_empty()).then_some(cleaned)
}

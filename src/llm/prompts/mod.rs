// ABOUTME: Prompts for the planner's LLM calls, loaded at compile time
// ABOUTME: Provides the constraint-parser instructions and the plan-composer template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Instructions for turning a free-text request into `ParsedConstraints` JSON
///
/// Contains the field definitions, the clarification rules, and three worked
/// examples (complete request, missing time/location, missing focus).
pub const INPUT_PARSER_PROMPT: &str = include_str!("input_parser.md");

/// Template for composing the final plan from constraints and candidates
///
/// Placeholders are written as `{name}` and filled by [`render`].
pub const PLAN_COMPOSER_TEMPLATE: &str = include_str!("plan_composer.md");

/// Get the constraint-parser system prompt
#[must_use]
pub const fn get_input_parser_prompt() -> &'static str {
    INPUT_PARSER_PROMPT
}

/// Fill `{name}` placeholders in a template.
///
/// Unknown placeholders are left untouched. Values are inserted verbatim and
/// are never rescanned for placeholders.
#[must_use]
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        if let Some((value, close)) = replacement {
            out.push_str(value);
            rest = &after[close + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

// ABOUTME: Integration tests for constraint extraction with a scripted oracle
// ABOUTME: Validates the clarification invariant, history forwarding, and failure fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::StubOracle;
use std::sync::Arc;
use workout_architect::errors::OracleError;
use workout_architect::models::{ConversationTurn, ParsedConstraints, Speaker};
use workout_architect::planning::{ConstraintExtractor, OutputSchema};

fn extractor(oracle: &Arc<StubOracle>) -> ConstraintExtractor {
    common::init_test_logging();
    ConstraintExtractor::new(oracle.clone())
}

// ============================================================================
// Complete And Incomplete Requests
// ============================================================================

#[tokio::test]
async fn test_complete_request_needs_no_clarification() {
    let oracle = Arc::new(StubOracle::new().reply(
        r#"{
            "focus_areas": ["legs"],
            "time_available_minutes": 60,
            "tiredness_level": "energetic",
            "location": "gym",
            "equipment_mentioned": null,
            "clarification_needed": false,
            "clarification_question": null,
            "processed_query_for_next_step": "User wants a 60-minute leg workout at the gym, feeling energetic."
        }"#,
    ));

    let parsed = extractor(&oracle)
        .extract("I want a leg workout for 1 hour at the gym. I'm feeling energetic.")
        .await;

    assert!(!parsed.clarification_needed);
    assert_eq!(parsed.focus_areas, Some(vec!["legs".to_owned()]));
    assert_eq!(parsed.time_available_minutes, Some(60));
    assert_eq!(parsed.location.as_deref(), Some("gym"));
    assert_eq!(parsed.tiredness_level.as_deref(), Some("energetic"));
    assert!(parsed.clarification_question.is_none());
}

#[tokio::test]
async fn test_missing_time_and_location_asks_only_for_those() {
    // The oracle forgets to flag clarification and supplies no question
    let oracle = Arc::new(StubOracle::new().reply(
        r#"{"focus_areas": ["upper body"], "clarification_needed": false}"#,
    ));

    let parsed = extractor(&oracle)
        .extract("I want to train upper body today.")
        .await;

    assert!(parsed.clarification_needed);
    let question = parsed.clarification_question.unwrap().to_lowercase();
    assert!(question.contains("time"));
    assert!(question.contains("gym or at home"));
    assert!(!question.contains("focus"));
}

#[tokio::test]
async fn test_oracle_question_is_kept_when_clarification_needed() {
    let oracle = Arc::new(StubOracle::new().reply(
        r#"{
            "focus_areas": ["upper body"],
            "clarification_needed": true,
            "clarification_question": "Okay, an upper body workout! How much time do you have, and will you be at the gym or at home?"
        }"#,
    ));

    let parsed = extractor(&oracle).extract("upper body").await;

    assert_eq!(
        parsed.clarification_question.as_deref(),
        Some("Okay, an upper body workout! How much time do you have, and will you be at the gym or at home?")
    );
}

#[tokio::test]
async fn test_spurious_clarification_flag_is_cleared() {
    let oracle = Arc::new(StubOracle::new().reply(
        r#"{
            "focus_areas": ["chest"],
            "time_available_minutes": 30,
            "location": "home",
            "clarification_needed": true,
            "clarification_question": "Anything else?"
        }"#,
    ));

    let parsed = extractor(&oracle).extract("chest, 30 minutes, home").await;

    assert!(!parsed.clarification_needed);
    assert!(parsed.clarification_question.is_none());
}

#[tokio::test]
async fn test_json_wrapped_in_prose_is_accepted() {
    let oracle = Arc::new(StubOracle::new().reply(
        "Here is the result:\n```json\n{\"focus_areas\": [\"back\"], \"time_available_minutes\": 45, \"location\": \"gym\"}\n```",
    ));

    let parsed = extractor(&oracle).extract("back day, 45 min, gym").await;

    assert!(!parsed.clarification_needed);
    assert_eq!(parsed.focus_areas, Some(vec!["back".to_owned()]));
}

#[tokio::test]
async fn test_minutes_as_string_or_float_are_accepted() {
    for minutes in [r#""60""#, "60.0"] {
        let oracle = Arc::new(StubOracle::new().reply(format!(
            r#"{{"focus_areas": ["legs"], "time_available_minutes": {minutes}, "location": "gym"}}"#
        )));

        let parsed = extractor(&oracle).extract("legs, an hour, gym").await;

        assert!(!parsed.clarification_needed, "minutes written as {minutes}");
        assert_eq!(parsed.time_available_minutes, Some(60));
        assert!(parsed.clarification_question.is_none());
    }
}

#[tokio::test]
async fn test_negative_minutes_ask_only_for_time() {
    let oracle = Arc::new(StubOracle::new().reply(
        r#"{"focus_areas": ["legs"], "time_available_minutes": -5, "location": "gym"}"#,
    ));

    let parsed = extractor(&oracle).extract("legs at the gym").await;

    assert!(parsed.clarification_needed);
    assert!(parsed.time_available_minutes.is_none());
    assert_eq!(parsed.focus_areas, Some(vec!["legs".to_owned()]));
    assert_eq!(parsed.location.as_deref(), Some("gym"));
    let question = parsed.clarification_question.unwrap();
    assert!(question.contains("time"));
    assert!(!question.contains("gym or at home"));
}

// ============================================================================
// Fallback
// ============================================================================

#[tokio::test]
async fn test_every_oracle_failure_degrades_to_clarification() {
    let failures = [
        OracleError::Transport("connection refused".to_owned()),
        OracleError::Timeout { secs: 60 },
        OracleError::Rejected("invalid api key".to_owned()),
        OracleError::EmptyResponse,
    ];
    for failure in failures {
        let oracle = Arc::new(StubOracle::new().fail(failure));
        let parsed = extractor(&oracle).extract("legs please").await;
        assert_eq!(parsed, ParsedConstraints::fallback("legs please"));
    }
}

#[tokio::test]
async fn test_non_json_output_degrades_to_clarification() {
    let oracle = Arc::new(StubOracle::new().reply("Sure, legs sounds great!"));

    let parsed = extractor(&oracle).extract("legs").await;

    assert!(parsed.clarification_needed);
    assert_eq!(parsed.processed_summary.as_deref(), Some("legs"));
}

// ============================================================================
// Oracle Call Shape
// ============================================================================

#[tokio::test]
async fn test_history_and_schema_are_forwarded() {
    let oracle = Arc::new(StubOracle::new().reply(
        r#"{"focus_areas": ["upper body"], "time_available_minutes": 45, "location": "home"}"#,
    ));
    let history = vec![
        ConversationTurn::user("I want to train upper body today."),
        ConversationTurn::assistant("How much time do you have, and will you be at the gym or at home?"),
    ];

    let parsed = extractor(&oracle)
        .extract_with_history("45 minutes at home", &history)
        .await;

    assert!(!parsed.clarification_needed);
    let calls = oracle.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].input, "45 minutes at home");
    assert_eq!(calls[0].context, history);
    assert_eq!(calls[0].context[1].speaker, Speaker::Assistant);
    assert!(matches!(calls[0].schema, OutputSchema::Json { .. }));
    assert!(calls[0].instructions.contains("clarification_question"));
}

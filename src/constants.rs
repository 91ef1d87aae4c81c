// ABOUTME: System-wide constants and default values for Workout Architect
// ABOUTME: Environment variable names, endpoints, limits, and user-facing fixed messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults and the names of the environment variables that can
//! override them. Values are read once by `config::AppConfig::from_env`.

/// Service identifiers used in logs
pub mod service_names {
    /// Service name reported in structured logs
    pub const WORKOUT_ARCHITECT: &str = "workout-architect";
    /// Catalog service name used in error messages
    pub const WGER: &str = "wger";
}

/// Environment variable names
pub mod env_vars {
    /// Root URL of the wger REST API
    pub const WGER_API_URL: &str = "WGER_API_URL";
    /// Optional wger API token
    pub const WGER_API_KEY: &str = "WGER_API_KEY";
    /// wger language id used to pick translations
    pub const WGER_LANGUAGE_ID: &str = "WGER_LANGUAGE_ID";
    /// Maximum exercises requested per catalog query
    pub const WGER_PAGE_LIMIT: &str = "WGER_PAGE_LIMIT";
    /// Catalog request timeout in seconds
    pub const WGER_TIMEOUT_SECS: &str = "WGER_TIMEOUT_SECS";

    /// Oracle backend: `openai`, or `local` (aliases `ollama`, `vllm`)
    pub const LLM_PROVIDER: &str = "LLM_PROVIDER";
    /// Model name sent with every completion request
    pub const LLM_MODEL_NAME: &str = "LLM_MODEL_NAME";
    /// API key for the hosted `OpenAI` provider
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Base URL of a local `OpenAI`-compatible server
    pub const LOCAL_LLM_BASE_URL: &str = "LOCAL_LLM_BASE_URL";
    /// Sampling temperature for oracle calls
    pub const LLM_TEMPERATURE: &str = "LLM_TEMPERATURE";
    /// Per-call oracle timeout in seconds
    pub const LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";

    /// Port the HTTP server listens on
    pub const HTTP_PORT: &str = "HTTP_PORT";

    /// Log output format: `json`, `pretty` or `compact`
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// When set, include source file and line in log records
    pub const LOG_INCLUDE_LOCATION: &str = "LOG_INCLUDE_LOCATION";
    /// When set, include span events in log records
    pub const LOG_INCLUDE_SPANS: &str = "LOG_INCLUDE_SPANS";
    /// Deployment environment name (e.g. `development`, `production`)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// External `API` endpoints
pub mod endpoints {
    /// Public wger `REST API` root
    pub const WGER_API_BASE: &str = "https://wger.de/api/v2";
    /// Exercise search resource, relative to the `API` root
    pub const WGER_EXERCISE_INFO_PATH: &str = "exerciseinfo/";
    /// `OpenAI` chat completions root
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    /// Ollama's `OpenAI`-compatible root
    pub const OLLAMA_API_BASE: &str = "http://localhost:11434/v1";
}

/// Default values for tunables
pub mod defaults {
    /// Records requested per catalog query
    pub const CATALOG_PAGE_LIMIT: u32 = 10;
    /// Catalog request timeout
    pub const CATALOG_TIMEOUT_SECS: u64 = 15;
    /// `status` query value selecting approved exercises only
    pub const CATALOG_APPROVED_STATUS: u32 = 2;
    /// Default hosted model
    pub const OPENAI_MODEL: &str = "gpt-4o-mini";
    /// Default local model
    pub const LOCAL_MODEL: &str = "qwen2.5:14b-instruct";
    /// Sampling temperature for both oracle calls
    pub const LLM_TEMPERATURE: f32 = 0.2;
    /// Oracle call timeout
    pub const LLM_TIMEOUT_SECS: u64 = 60;
    /// Server listen port
    pub const HTTP_PORT: u16 = 8088;
}

/// Input limits
pub mod limits {
    /// Longest accepted query over the `HTTP API`
    pub const MAX_QUERY_CHARS: usize = 2000;
    /// Description preview length in candidate listings
    pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;
    /// Upper bound on a catalog error body kept in logs
    pub const ERROR_BODY_PREVIEW_CHARS: usize = 200;
    /// Prior turns forwarded to the constraint extractor
    pub const MAX_CONTEXT_TURNS: usize = 10;
}

/// Fixed user-facing sentences
pub mod messages {
    /// Reply to a blank query
    pub const EMPTY_QUERY_PROMPT: &str = "Tell me what kind of workout you'd like: which \
        muscle groups to focus on, how much time you have, and whether you'll be at the gym \
        or at home.";
    /// Reply when the catalog returns zero records
    pub const NO_EXERCISES_FOUND: &str = "Sorry, no exercises were found in the catalog that \
        match your request, so I can't create a plan. Try a different focus area, location, or \
        equipment.";
    /// Reply when plan composition fails
    pub const COMPOSER_FAILURE: &str =
        "Error: I encountered a problem while designing the final workout plan.";
    /// Prefix of the reply to an unexpected internal failure
    pub const UNEXPECTED_FAILURE_PREFIX: &str =
        "Sorry, an error occurred while processing your request";
}

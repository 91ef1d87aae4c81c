// ABOUTME: Configuration management module for the planner's runtime settings
// ABOUTME: Exposes the immutable application configuration built once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Workout Architect
//!
//! - **Environment**: catalog, LLM, and server settings read from environment
//!   variables (and an optional `.env` file)

/// Environment and server configuration
pub mod environment;

pub use environment::{AppConfig, CatalogConfig, LlmConfig, LlmProviderType};

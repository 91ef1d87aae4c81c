// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses catalog, LLM, and server settings into one immutable configuration value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::{defaults, endpoints, env_vars};
use crate::models::{ENGLISH_LANGUAGE_ID, MAX_CATALOG_LIMIT};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::{info, warn};

/// Which LLM backend answers oracle calls
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// Hosted `OpenAI` chat completions
    #[default]
    OpenAi,
    /// Local `OpenAI`-compatible server (Ollama, vLLM)
    Local,
}

impl LlmProviderType {
    /// Parse from an environment value
    ///
    /// # Errors
    ///
    /// Returns an error for unknown provider names
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "local" | "ollama" | "vllm" => Ok(Self::Local),
            other => Err(anyhow!(
                "Unsupported {} value '{other}' (expected openai or local)",
                env_vars::LLM_PROVIDER
            )),
        }
    }

    /// Default model for this backend
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => defaults::OPENAI_MODEL,
            Self::Local => defaults::LOCAL_MODEL,
        }
    }

    /// Default base URL for this backend
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => endpoints::OPENAI_API_BASE,
            Self::Local => endpoints::OLLAMA_API_BASE,
        }
    }
}

impl fmt::Display for LlmProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Exercise catalog settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// `API` root, without the resource path
    pub base_url: String,
    /// Optional token sent as `Authorization: Token <key>`
    pub api_key: Option<String>,
    /// Locale id used for translations
    pub language_id: u32,
    /// Records requested per query (1..=25)
    pub page_limit: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: endpoints::WGER_API_BASE.to_owned(),
            api_key: None,
            language_id: ENGLISH_LANGUAGE_ID,
            page_limit: defaults::CATALOG_PAGE_LIMIT,
            timeout_secs: defaults::CATALOG_TIMEOUT_SECS,
        }
    }
}

/// LLM settings shared by both oracle calls
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Backend type
    pub provider: LlmProviderType,
    /// Model identifier
    pub model: String,
    /// `API` key (required for `OpenAI`)
    pub api_key: Option<String>,
    /// `API` root
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Oracle call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::OpenAi,
            model: defaults::OPENAI_MODEL.to_owned(),
            api_key: None,
            base_url: endpoints::OPENAI_API_BASE.to_owned(),
            temperature: defaults::LLM_TEMPERATURE,
            timeout_secs: defaults::LLM_TIMEOUT_SECS,
        }
    }
}

/// Complete application configuration, read-only after startup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Exercise catalog settings
    pub catalog: CatalogConfig,
    /// LLM settings
    pub llm: LlmConfig,
    /// Port for the `HTTP` server binary
    pub http_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            llm: LlmConfig::default(),
            http_port: defaults::HTTP_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric value cannot be parsed, the provider is
    /// unknown, or a required key is missing
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let page_limit: u32 = env_var_or(
            env_vars::WGER_PAGE_LIMIT,
            &defaults::CATALOG_PAGE_LIMIT.to_string(),
        )
        .parse()
        .context("Invalid WGER_PAGE_LIMIT value")?;

        let catalog = CatalogConfig {
            base_url: env_var_or(env_vars::WGER_API_URL, endpoints::WGER_API_BASE),
            api_key: optional_env_var(env_vars::WGER_API_KEY),
            language_id: env_var_or(env_vars::WGER_LANGUAGE_ID, &ENGLISH_LANGUAGE_ID.to_string())
                .parse()
                .context("Invalid WGER_LANGUAGE_ID value")?,
            page_limit: page_limit.clamp(1, MAX_CATALOG_LIMIT),
            timeout_secs: env_var_or(
                env_vars::WGER_TIMEOUT_SECS,
                &defaults::CATALOG_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid WGER_TIMEOUT_SECS value")?,
        };

        let provider = optional_env_var(env_vars::LLM_PROVIDER)
            .map_or(Ok(LlmProviderType::default()), |v| LlmProviderType::parse(&v))?;

        let llm = LlmConfig {
            provider,
            model: env_var_or(env_vars::LLM_MODEL_NAME, provider.default_model()),
            api_key: optional_env_var(env_vars::OPENAI_API_KEY),
            base_url: match provider {
                LlmProviderType::OpenAi => provider.default_base_url().to_owned(),
                LlmProviderType::Local => {
                    env_var_or(env_vars::LOCAL_LLM_BASE_URL, provider.default_base_url())
                }
            },
            temperature: env_var_or(
                env_vars::LLM_TEMPERATURE,
                &defaults::LLM_TEMPERATURE.to_string(),
            )
            .parse()
            .context("Invalid LLM_TEMPERATURE value")?,
            timeout_secs: env_var_or(
                env_vars::LLM_TIMEOUT_SECS,
                &defaults::LLM_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid LLM_TIMEOUT_SECS value")?,
        };

        let config = Self {
            catalog,
            llm,
            http_port: env_var_or(env_vars::HTTP_PORT, &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field requirements
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is missing or a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.llm.provider == LlmProviderType::OpenAi && self.llm.api_key.is_none() {
            return Err(anyhow!(
                "{} is required when {}=openai",
                env_vars::OPENAI_API_KEY,
                env_vars::LLM_PROVIDER
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(anyhow!(
                "{} must be between 0.0 and 2.0",
                env_vars::LLM_TEMPERATURE
            ));
        }
        if self.llm.timeout_secs == 0 || self.catalog.timeout_secs == 0 {
            return Err(anyhow!("Timeouts must be at least one second"));
        }
        if self.catalog.api_key.is_none() {
            warn!("WGER_API_KEY is not set; using anonymous catalog access");
        }
        Ok(())
    }

    /// Human-readable configuration summary, without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Workout Architect Configuration:\n\
             - Catalog: {} (language {}, page limit {}, timeout {}s, key {})\n\
             - LLM: {} model {} at {} (temperature {}, timeout {}s)\n\
             - HTTP Port: {}",
            self.catalog.base_url,
            self.catalog.language_id,
            self.catalog.page_limit,
            self.catalog.timeout_secs,
            if self.catalog.api_key.is_some() {
                "set"
            } else {
                "unset"
            },
            self.llm.provider,
            self.llm.model,
            self.llm.base_url,
            self.llm.temperature,
            self.llm.timeout_secs,
            self.http_port,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a non-blank environment variable
fn optional_env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

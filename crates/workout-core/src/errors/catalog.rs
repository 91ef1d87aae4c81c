// ABOUTME: Failure taxonomy for the remote exercise catalog lookup
// ABOUTME: Distinguishes unreachable, rejected, and malformed responses with user-facing text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Errors raised by an exercise catalog query.
///
/// An empty result set is not represented here; it is a successful lookup
/// that returned zero records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Network failure, connection refusal, or timeout
    #[error("exercise catalog unavailable: {reason}")]
    RemoteUnavailable {
        /// Transport-level reason
        reason: String,
    },
    /// The catalog answered with a non-2xx status
    #[error("exercise catalog rejected the request with HTTP {status}: {detail}")]
    RemoteRejected {
        /// HTTP status code returned by the catalog
        status: u16,
        /// Truncated response body
        detail: String,
    },
    /// The payload did not match the expected schema
    #[error("exercise catalog returned a malformed response: {reason}")]
    MalformedResponse {
        /// Deserialization failure detail
        reason: String,
    },
}

impl CatalogError {
    /// Create a `RemoteUnavailable` error
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a `RemoteRejected` error
    #[must_use]
    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            detail: detail.into(),
        }
    }

    /// Create a `MalformedResponse` error
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Sentence shown to the user when this error ends a turn
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::RemoteUnavailable { .. } => {
                "Sorry, I can't reach the exercise catalog right now, so I can't build a plan. \
                 Please try again in a few minutes."
            }
            Self::RemoteRejected { .. } => {
                "Sorry, the exercise catalog rejected the search for your request, so I can't \
                 build a plan. Try describing a different focus area or equipment."
            }
            Self::MalformedResponse { .. } => {
                "Sorry, the exercise catalog sent back data I couldn't read, so I can't build \
                 a plan right now. Please try again later."
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        let code = match &error {
            CatalogError::RemoteUnavailable { .. } => ErrorCode::ExternalServiceUnavailable,
            CatalogError::RemoteRejected { .. } | CatalogError::MalformedResponse { .. } => {
                ErrorCode::ExternalServiceError
            }
        };
        Self::new(code, error.to_string())
    }
}

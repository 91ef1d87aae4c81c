// ABOUTME: Failure taxonomy for text-understanding oracle calls
// ABOUTME: Covers transport, timeout, rejection, and non-conforming output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Errors raised by an oracle call (constraint extraction or plan composition)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle could not be reached
    #[error("oracle transport failure: {0}")]
    Transport(String),
    /// The oracle did not answer within the configured bound
    #[error("oracle call timed out after {secs}s")]
    Timeout {
        /// Timeout that elapsed, in seconds
        secs: u64,
    },
    /// The oracle refused the call (auth, quota, rate limit)
    #[error("oracle rejected the call: {0}")]
    Rejected(String),
    /// The oracle answered but the output does not conform to the requested schema
    #[error("oracle output did not match the requested schema: {0}")]
    MalformedOutput(String),
    /// The oracle answered with no content
    #[error("oracle returned an empty response")]
    EmptyResponse,
}

impl OracleError {
    /// Map a provider-level `AppError` onto the oracle taxonomy
    #[must_use]
    pub fn from_provider(error: &AppError) -> Self {
        match error.code {
            ErrorCode::ExternalAuthFailed | ErrorCode::ExternalRateLimited => {
                Self::Rejected(error.message.clone())
            }
            ErrorCode::SerializationError => Self::MalformedOutput(error.message.clone()),
            _ => Self::Transport(error.message.clone()),
        }
    }
}

impl From<OracleError> for AppError {
    fn from(error: OracleError) -> Self {
        let code = match &error {
            OracleError::Transport(_) | OracleError::Timeout { .. } => {
                ErrorCode::ExternalServiceUnavailable
            }
            OracleError::Rejected(_) => ErrorCode::ExternalAuthFailed,
            OracleError::MalformedOutput(_) | OracleError::EmptyResponse => {
                ErrorCode::ExternalServiceError
            }
        };
        Self::new(code, error.to_string())
    }
}

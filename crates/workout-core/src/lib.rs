// ABOUTME: Core types for the Workout Architect conversational planner
// ABOUTME: Foundation crate with error handling, transcript, constraint, and exercise models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Core
//!
//! Foundation crate providing the shared types of the workout planner. It is
//! designed to change infrequently, enabling incremental compilation benefits
//! in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   catalog/oracle domain errors
//! - **models**: Transcript, parsed constraints, catalog filter, and exercise records

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (transcript, constraints, exercises)
pub mod models;

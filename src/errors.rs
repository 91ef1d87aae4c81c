// ABOUTME: Re-export of the unified error types defined in workout-core
// ABOUTME: Keeps `crate::errors::*` paths stable for the binaries and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use workout_core::errors::*;

// ABOUTME: Application constants re-exported from prompt-forge-core
// ABOUTME: Default capacities, timeouts, file names and settings keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use prompt_forge_core::constants::*;

// ABOUTME: Unified error types re-exported from prompt-forge-core
// ABOUTME: AppError, ErrorCode and AppResult shared by every module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use prompt_forge_core::errors::*;

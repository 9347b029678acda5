// ABOUTME: Core data models re-exported from prompt-forge-core
// ABOUTME: Generation options, presets, chats and messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use prompt_forge_core::models::*;

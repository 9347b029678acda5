// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Command modules for prompt-forge
// ABOUTME: Composition and generation, model configuration, presets and chats

pub mod chats;
pub mod config;
pub mod generate;
pub mod presets;

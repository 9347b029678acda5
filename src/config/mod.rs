// ABOUTME: Configuration module for data locations, cache sizes, timeouts and classifier rules
// ABOUTME: Everything is read from environment variables with built-in defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Prompt Forge
//!
//! - **Environment**: `AppConfig` and its sections, loaded from `PROMPT_FORGE_*` variables
//! - **Classifier**: pattern lists used to screen user input before composition

/// Input classifier pattern lists
pub mod classifier;
/// Environment-driven application configuration
pub mod environment;

pub use classifier::ClassifierConfig;
pub use environment::{AppConfig, CacheConfig, ModelTimeouts, StoreConfig};

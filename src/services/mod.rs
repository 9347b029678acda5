// ABOUTME: Domain services over the JSON document store
// ABOUTME: Preset management and chat history with their business rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services own the rules (unique names, the protected default preset,
//! message caps) and use [`JsonStore`](crate::store::JsonStore) for
//! persistence, so the CLI and [`PromptStudio`](crate::studio::PromptStudio)
//! apply them the same way.

/// Chats and their capped message history
pub mod chats;

/// Per-user generation presets
pub mod presets;

pub use chats::ChatService;
pub use presets::PresetService;

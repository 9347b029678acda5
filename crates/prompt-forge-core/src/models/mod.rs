// ABOUTME: Core data models for Prompt Forge
// ABOUTME: Re-exports generation options, presets, chats and messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Persisted and in-flight records shared by the composer, the stores and the
//! CLI. Everything serializes to camelCase JSON, matching the document files.
//!
//! - `GenerationOptions`: common fields plus a `TaskOptions` union tagged by `taskType`
//! - `Preset`: named options owned by a user
//! - `Chat` / `Message`: conversation history

mod chat;
mod options;
mod preset;

pub use chat::{title_from_input, Chat, Message, MessageRole};
pub use options::{
    AspectRatio, CameraMovement, CodingOptions, CommonOptions, DetailLevel, GenerationOptions,
    ImageOptions, MarketingChannel, MarketingOptions, OutputFormat, PointOfView, ResearchOptions,
    StylePreset, TaskOptions, TaskType, Tone, UnknownOption, VideoOptions, WritingOptions,
    WritingStyle,
};
pub use preset::{is_default_name, normalize_preset_name, Preset};

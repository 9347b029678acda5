// ABOUTME: Core types and constants for the Prompt Forge workspace
// ABOUTME: Foundation crate with error handling, constants, and persisted domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Prompt Forge Core
//!
//! Foundation crate providing shared types and constants for Prompt Forge.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide defaults organized by domain
//! - **models**: Generation options, presets, chats and messages

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants and default values organized by domain
pub mod constants;

/// Core data models (options, presets, chats, messages)
pub mod models;

// ABOUTME: Main library entry point for Prompt Forge
// ABOUTME: Local-first prompt composition, caching, model access and JSON-file persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Prompt Forge
//!
//! Turns a short description plus a bag of options into a structured prompt,
//! sends it to a language model running on the same machine, and keeps
//! presets, chats and versions in plain JSON files.
//!
//! ## Architecture
//!
//! - **Prompts**: directive builders, input screening and the composer
//! - **Cache**: fingerprinted two-tier cache in front of the composer
//! - **LLM**: client for an Ollama-compatible runtime on loopback
//! - **Store**: JSON document files with advisory locking
//! - **Services**: presets and chats on top of the store
//! - **Studio**: the facade that runs a whole generation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use prompt_forge::cache::CacheMode;
//! use prompt_forge::config::AppConfig;
//! use prompt_forge::errors::AppResult;
//! use prompt_forge::models::{GenerationOptions, TaskType, Tone};
//! use prompt_forge::studio::PromptStudio;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let studio = PromptStudio::open(AppConfig::from_env()?)?;
//!     let options = GenerationOptions::for_task(TaskType::Writing).with_tone(Tone::Formal);
//!     let (composition, _) = studio.compose("a poem about rain", &options, CacheMode::Use).await;
//!     println!("{}", composition.text());
//!     Ok(())
//! }
//! ```

/// Fingerprinted two-tier composition cache
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// Local model client and response clean-up
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain models shared with the core crate
pub mod models;

/// Directive builders, input classification and prompt composition
pub mod prompts;

/// Preset and chat services
pub mod services;

/// JSON document store with advisory locking
pub mod store;

/// Orchestration of a full generation
pub mod studio;

/// In-session version history
pub mod versions;

// ABOUTME: Prompt assembly: directive builders, input screening and the final composer
// ABOUTME: Fixed instruction texts are loaded at compile time from markdown files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Assembly
//!
//! A composition merges, in order: the system prompt, the mode guidelines,
//! the section-delimiter policy, the task guideline, optional context and
//! examples, the directive list, a one-line constraint summary, the user's
//! input, the single-output instruction and, when a detail level is set, a
//! closing word-count reminder.
//!
//! Everything here is pure and deterministic; caching lives in [`crate::cache`].

/// Input screening for injection attempts and low-content messages
pub mod classifier;
/// Final prompt assembly
pub mod composer;
/// Option-to-sentence lookup tables
pub mod directives;
/// Per-task guideline paragraphs
pub mod guidelines;

pub use classifier::{InputClass, InputClassifier};
pub use composer::{Composer, Composition, PromptComposer, Rejection};
pub use directives::{build_directives, Directive};

/// Built-in system prompt, used until the user saves their own
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("system_prompt.md");

/// Fixed behavioural rules placed right after the system prompt
pub const MODE_GUIDELINES: &str = include_str!("mode_guidelines.md");

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Helper modules for prompt-forge
// ABOUTME: Option flag parsing and output formatting

pub mod display;
pub mod options;

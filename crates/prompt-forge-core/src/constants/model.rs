// ABOUTME: Local model runtime constants for endpoints, defaults, and timeouts
// ABOUTME: Targets an Ollama-style runtime listening on a loopback address
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default provider identifier
pub const DEFAULT_PROVIDER: &str = "ollama";

/// Default runtime base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Generation endpoint, relative to the base URL
pub const GENERATE_ENDPOINT: &str = "api/generate";

/// Model listing endpoint, relative to the base URL
pub const TAGS_ENDPOINT: &str = "api/tags";

/// Default timeout for a generation request
pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 60;

/// Default timeout for the connectivity check
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 5;

/// Characters of an error body kept in error messages
pub const ERROR_BODY_PREVIEW_CHARS: usize = 200;

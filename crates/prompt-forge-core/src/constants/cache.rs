// ABOUTME: Composition cache constants for tier capacities and session file naming
// ABOUTME: Shared by the in-memory LRU tier and the session-persisted tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum entries for the in-memory composition tier
pub const DEFAULT_MEMORY_CAPACITY: usize = 200;

/// Default maximum entries for the session-persisted tier
pub const DEFAULT_SESSION_CAPACITY: usize = 500;

/// Directory name (under the OS temp dir) holding session-scoped cache files
pub const SESSION_DIR_NAME: &str = "prompt-forge-session";

/// Collection name of the session composition document
pub const SESSION_COLLECTION: &str = "compositions";

/// Fingerprint namespace, bumped whenever composition output changes shape
pub const FINGERPRINT_VERSION: &str = "v1";

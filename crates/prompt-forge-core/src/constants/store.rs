// ABOUTME: JSON document store constants for locking, read caching, and file naming
// ABOUTME: Lock retry/stale values bound how long a writer waits for another process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Lock acquisition attempts before giving up
pub const DEFAULT_LOCK_RETRIES: u32 = 50;

/// Delay between lock acquisition attempts
pub const DEFAULT_LOCK_RETRY_MS: u64 = 100;

/// Age after which a lock file is considered abandoned
pub const DEFAULT_LOCK_STALE_SECS: u64 = 10;

/// Time a cached read stays valid before the file's mtime is re-checked
pub const DEFAULT_READ_CACHE_TTL_MS: u64 = 2_000;

/// Document format version written into every file
pub const DOCUMENT_VERSION: &str = "1.0";

/// Extension of the sibling lock file
pub const LOCK_EXTENSION: &str = "lock";

/// Extension of the transient file used for atomic writes
pub const TMP_EXTENSION: &str = "tmp";

/// Collection names (one JSON file each)
pub mod collections {
    /// Presets
    pub const PRESETS: &str = "presets";
    /// Chats
    pub const CHATS: &str = "chats";
    /// Chat messages
    pub const MESSAGES: &str = "messages";
    /// Flat application settings
    pub const SETTINGS: &str = "settings";
}

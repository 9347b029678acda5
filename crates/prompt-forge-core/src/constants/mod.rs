// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Default capacities, timeouts, file names and settings keys for Prompt Forge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Composition cache constants (capacities, file names)
pub mod cache;
/// Local model runtime constants (endpoints, timeouts)
pub mod model;
/// JSON document store constants (locking, file names, versions)
pub mod store;

/// Service identity used in logs and directory names
pub mod service_names {
    /// Application name
    pub const PROMPT_FORGE: &str = "prompt-forge";
}

/// Settings keys persisted in the flat settings document
pub mod settings_keys {
    /// Local model provider identifier
    pub const MODEL_PROVIDER: &str = "localModel.provider";
    /// Local model runtime base URL (loopback only)
    pub const MODEL_BASE_URL: &str = "localModel.baseUrl";
    /// Local model name
    pub const MODEL_NAME: &str = "localModel.model";
    /// Whether the local model is the default provider
    pub const DEFAULT_PROVIDER: &str = "localModel.isDefaultProvider";
    /// User-edited system prompt override
    pub const SYSTEM_PROMPT: &str = "prompt.systemPrompt";
    /// Prefix for the per-user default preset pointer (`defaultPreset.<user_id>`)
    pub const DEFAULT_PRESET_PREFIX: &str = "defaultPreset.";
}

/// Chat and history limits
pub mod limits {
    /// Default number of messages kept per chat
    pub const DEFAULT_MESSAGE_CAP: usize = 50;
    /// Default number of in-session prompt versions kept
    pub const DEFAULT_VERSION_HISTORY: usize = 100;
    /// Longest chat title derived from a first message
    pub const CHAT_TITLE_MAX_CHARS: usize = 60;
    /// Title of a chat before its first message names it
    pub const DEFAULT_CHAT_TITLE: &str = "New chat";
}

/// Preset defaults
pub mod presets {
    /// Name of the bootstrapped, undeletable preset
    pub const DEFAULT_PRESET_NAME: &str = "Default";
}

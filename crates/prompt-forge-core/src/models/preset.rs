// ABOUTME: Preset model: a named, reusable bundle of generation options owned by one user
// ABOUTME: Includes the name normalisation used for uniqueness and default-preset protection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::options::{GenerationOptions, TaskType};
use crate::constants::presets::DEFAULT_PRESET_NAME;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named generation options saved by a user
///
/// `task_type` is derived from `options` on read, so a stale or unknown
/// stored value never fails the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredPreset")]
pub struct Preset {
    /// Unique identifier
    pub id: String,
    /// Owner of the preset
    pub user_id: String,
    /// Display name, unique per user after normalisation
    pub name: String,
    /// Task type of `options`, kept alongside for listing without a parse
    pub task_type: TaskType,
    /// Saved options
    pub options: GenerationOptions,
    /// When the preset was created
    pub created_at: DateTime<Utc>,
    /// When the preset was last changed
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPreset {
    id: String,
    user_id: String,
    name: String,
    #[serde(default)]
    options: GenerationOptions,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoredPreset> for Preset {
    fn from(stored: StoredPreset) -> Self {
        Self {
            id: stored.id,
            user_id: stored.user_id,
            name: stored.name,
            task_type: stored.options.task_type(),
            options: stored.options,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

impl Preset {
    /// Create a preset with a fresh id
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        options: GenerationOptions,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into().trim().to_owned(),
            task_type: options.task_type(),
            options,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the saved options, keeping `task_type` in step
    pub fn set_options(&mut self, options: GenerationOptions) {
        self.task_type = options.task_type();
        self.options = options;
        self.updated_at = Utc::now();
    }

    /// Whether this is the protected default preset
    #[must_use]
    pub fn is_default(&self) -> bool {
        is_default_name(&self.name)
    }

    /// Whether `name` collides with this preset's name
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        normalize_preset_name(&self.name) == normalize_preset_name(name)
    }
}

/// Comparison key for preset names: trimmed and lowercased
#[must_use]
pub fn normalize_preset_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether `name` refers to the protected default preset
#[must_use]
pub fn is_default_name(name: &str) -> bool {
    normalize_preset_name(name) == normalize_preset_name(DEFAULT_PRESET_NAME)
}

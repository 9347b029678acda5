// ABOUTME: Bounded in-session history of generated prompt versions
// ABOUTME: Oldest versions fall off once the history is full; nothing is persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::DEFAULT_VERSION_HISTORY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// One input/output pair produced during the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Unique id
    pub id: String,
    /// Raw user input
    pub input: String,
    /// Text shown to the user (model reply or rejection message)
    pub output: String,
    /// When the version was recorded
    pub created_at: DateTime<Utc>,
}

/// Newest-first history with a fixed capacity
#[derive(Debug, Clone)]
pub struct VersionHistory {
    entries: VecDeque<Version>,
    capacity: usize,
}

impl Default for VersionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_HISTORY)
    }
}

impl VersionHistory {
    /// History keeping at most `capacity` versions (at least one)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a version, dropping the oldest if full
    pub fn push(&mut self, input: impl Into<String>, output: impl Into<String>) -> Version {
        let version = Version {
            id: Uuid::new_v4().to_string(),
            input: input.into(),
            output: output.into(),
            created_at: Utc::now(),
        };
        self.entries.push_front(version.clone());
        self.entries.truncate(self.capacity);
        version
    }

    /// All versions, newest first
    #[must_use]
    pub fn list(&self) -> Vec<Version> {
        self.entries.iter().cloned().collect()
    }

    /// Most recent version
    #[must_use]
    pub fn latest(&self) -> Option<&Version> {
        self.entries.front()
    }

    /// Version by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Version> {
        self.entries.iter().find(|v| v.id == id)
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of versions held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

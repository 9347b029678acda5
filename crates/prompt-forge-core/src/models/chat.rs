// ABOUTME: Chat and message models for persisted conversation history
// ABOUTME: Messages belong to a chat and are ordered by strictly increasing creation time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::{CHAT_TITLE_MAX_CHARS, DEFAULT_CHAT_TITLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A conversation owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Unique identifier
    pub id: String,
    /// Owner of the chat
    pub user_id: String,
    /// Display title
    pub title: String,
    /// When the chat was created
    pub created_at: DateTime<Utc>,
    /// Bumped on rename and on every appended message
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    /// Create a chat with a fresh id
    #[must_use]
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The person using the app
    User,
    /// The local model
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

/// One turn in a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier
    pub id: String,
    /// Chat this message belongs to
    pub chat_id: String,
    /// Author
    pub role: MessageRole,
    /// Message body
    pub content: String,
    /// Creation time, strictly increasing within a chat
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message with a fresh id
    #[must_use]
    pub fn new(
        chat_id: impl Into<String>,
        role: MessageRole,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            role,
            content: content.into(),
            created_at,
        }
    }
}

/// Chat title derived from the first user input: first line, whitespace
/// collapsed, cut at a character boundary with an ellipsis
#[must_use]
pub fn title_from_input(input: &str) -> String {
    let first_line = input.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return DEFAULT_CHAT_TITLE.to_owned();
    }
    if collapsed.chars().count() <= CHAT_TITLE_MAX_CHARS {
        return collapsed;
    }
    let mut title: String = collapsed.chars().take(CHAT_TITLE_MAX_CHARS - 1).collect();
    title.push('…');
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_input() {
        assert_eq!(title_from_input("\n  a poem   about rain\nsecond"), "a poem about rain");
        assert_eq!(title_from_input("   "), DEFAULT_CHAT_TITLE);

        let long = "word ".repeat(40);
        let title = title_from_input(&long);
        assert_eq!(title.chars().count(), CHAT_TITLE_MAX_CHARS);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}

// ABOUTME: Chat threads and their message history with a per-chat message cap
// ABOUTME: Deleting a chat removes its messages; appends keep timestamps strictly increasing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::StoreConfig;
use crate::constants::limits::DEFAULT_CHAT_TITLE;
use crate::constants::store::collections;
use crate::errors::{AppError, AppResult};
use crate::models::{title_from_input, Chat, Message, MessageRole};
use crate::store::{Entity, JsonStore};
use chrono::{Duration, Utc};
use std::path::Path;
use tracing::{debug, info};

impl Entity for Chat {
    const COLLECTION: &'static str = collections::CHATS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Message {
    const COLLECTION: &'static str = collections::MESSAGES;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Chats and messages for one data directory
pub struct ChatService {
    chats: JsonStore<Chat>,
    messages: JsonStore<Message>,
    message_cap: usize,
}

impl ChatService {
    /// Service over `chats.json` and `messages.json` in `dir`
    #[must_use]
    pub fn open(dir: &Path, config: StoreConfig, message_cap: usize) -> Self {
        Self {
            chats: JsonStore::open(dir, config.clone()),
            messages: JsonStore::open(dir, config),
            message_cap: message_cap.max(1),
        }
    }

    /// Most messages kept per chat
    #[must_use]
    pub const fn message_cap(&self) -> usize {
        self.message_cap
    }

    /// Start a chat; a blank or missing title becomes "New chat"
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn create_chat(&self, user_id: &str, title: Option<&str>) -> AppResult<Chat> {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CHAT_TITLE);
        let chat = self.chats.insert(Chat::new(user_id, title)).await?;
        info!(user_id, chat_id = %chat.id, "chat created");
        Ok(chat)
    }

    /// The user's chats, most recently active first
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn list_chats(&self, user_id: &str) -> AppResult<Vec<Chat>> {
        let mut chats = self.chats.find(|c| c.user_id == user_id).await?;
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(chats)
    }

    /// One of the user's chats
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if it does not exist or belongs to someone else
    pub async fn get_chat(&self, user_id: &str, chat_id: &str) -> AppResult<Chat> {
        self.chats
            .get(chat_id)
            .await?
            .filter(|c| c.user_id == user_id)
            .ok_or_else(|| AppError::not_found(format!("Chat '{chat_id}'")))
    }

    /// Change a chat's title
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title, `ResourceNotFound`, or a storage error
    pub async fn rename_chat(&self, user_id: &str, chat_id: &str, title: &str) -> AppResult<Chat> {
        let title = title.trim().to_owned();
        if title.is_empty() {
            return Err(AppError::invalid_input("Chat title cannot be empty"));
        }
        self.get_chat(user_id, chat_id).await?;
        self.chats
            .update(chat_id, move |chat| {
                chat.title = title;
                chat.updated_at = Utc::now();
                Ok(())
            })
            .await
    }

    /// Delete a chat and every message in it
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound`, or a storage error
    pub async fn delete_chat(&self, user_id: &str, chat_id: &str) -> AppResult<()> {
        self.get_chat(user_id, chat_id).await?;
        let target = chat_id.to_owned();
        let removed = self
            .messages
            .mutate(move |data| {
                let before = data.len();
                data.retain(|_, m| m.chat_id != target);
                Ok(before - data.len())
            })
            .await?;
        self.chats.remove(chat_id).await?;
        info!(user_id, chat_id, messages = removed, "chat deleted");
        Ok(())
    }

    /// Add a message, dropping the chat's oldest messages beyond the cap
    ///
    /// The first user message in an untitled chat also names the chat.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown chat, or a storage error
    pub async fn append_message(
        &self,
        user_id: &str,
        chat_id: &str,
        role: MessageRole,
        content: &str,
    ) -> AppResult<Message> {
        let mut appended = self
            .append_messages(user_id, chat_id, &[(role, content)])
            .await?;
        appended
            .pop()
            .ok_or_else(|| AppError::internal("append produced no message"))
    }

    /// Add several messages in one write, in order
    ///
    /// Either every message lands or none does.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown chat, or a storage error
    pub async fn append_messages(
        &self,
        user_id: &str,
        chat_id: &str,
        entries: &[(MessageRole, &str)],
    ) -> AppResult<Vec<Message>> {
        self.get_chat(user_id, chat_id).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let cap = self.message_cap;
        let chat = chat_id.to_owned();
        let entries: Vec<(MessageRole, String)> = entries
            .iter()
            .map(|(role, content)| (*role, (*content).to_owned()))
            .collect();

        let appended = self
            .messages
            .mutate(move |data| {
                let mut thread: Vec<(String, chrono::DateTime<Utc>)> = data
                    .values()
                    .filter(|m| m.chat_id == chat)
                    .map(|m| (m.id.clone(), m.created_at))
                    .collect();
                thread.sort_by_key(|(_, at)| *at);

                let mut appended = Vec::with_capacity(entries.len());
                for (role, content) in entries {
                    let now = Utc::now();
                    let created_at = match thread.last() {
                        Some((_, last)) if *last >= now => *last + Duration::milliseconds(1),
                        _ => now,
                    };
                    let message = Message::new(chat.as_str(), role, content, created_at);
                    data.insert(message.id.clone(), message.clone());
                    thread.push((message.id.clone(), created_at));
                    appended.push(message);
                }

                let overflow = thread.len().saturating_sub(cap);
                for (id, _) in thread.iter().take(overflow) {
                    data.remove(id);
                }
                if overflow > 0 {
                    debug!(chat_id = %chat, evicted = overflow, "message cap reached");
                }
                Ok(appended)
            })
            .await?;

        let Some(last) = appended.last() else {
            return Ok(appended);
        };
        let updated_at = last.created_at;
        let title = appended
            .iter()
            .find(|m| m.role == MessageRole::User)
            .map(|m| title_from_input(&m.content));
        self.chats
            .update(chat_id, move |chat| {
                chat.updated_at = updated_at;
                if let Some(title) = title {
                    if chat.title == DEFAULT_CHAT_TITLE {
                        chat.title = title;
                    }
                }
                Ok(())
            })
            .await?;
        Ok(appended)
    }

    /// A chat's messages, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown chat, or a storage error
    pub async fn messages(&self, user_id: &str, chat_id: &str) -> AppResult<Vec<Message>> {
        self.get_chat(user_id, chat_id).await?;
        let mut messages = self.messages.find(|m| m.chat_id == chat_id).await?;
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}

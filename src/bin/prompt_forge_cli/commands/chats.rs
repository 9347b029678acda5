// ABOUTME: Chat history commands for prompt-forge
// ABOUTME: Handles list, show, create and delete for the current user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use prompt_forge::errors::AppResult;
use prompt_forge::studio::PromptStudio;

use crate::helpers::display::{display_chats, display_messages};

type Result<T> = AppResult<T>;

/// List chats
pub async fn list(studio: &PromptStudio, user: &str) -> Result<()> {
    let chats = studio.chats().list_chats(user).await?;
    display_chats(&chats);
    Ok(())
}

/// Print one chat
pub async fn show(studio: &PromptStudio, user: &str, chat_id: &str) -> Result<()> {
    let chat = studio.chats().get_chat(user, chat_id).await?;
    let messages = studio.chats().messages(user, chat_id).await?;
    display_messages(&chat, &messages);
    Ok(())
}

/// Start an empty chat
pub async fn create(studio: &PromptStudio, user: &str, title: Option<&str>) -> Result<()> {
    let chat = studio.chats().create_chat(user, title).await?;
    println!("Created chat '{}' ({})", chat.title, chat.id);
    Ok(())
}

/// Delete a chat and its messages
pub async fn delete(studio: &PromptStudio, user: &str, chat_id: &str) -> Result<()> {
    studio.chats().delete_chat(user, chat_id).await?;
    println!("Deleted chat {chat_id}");
    Ok(())
}

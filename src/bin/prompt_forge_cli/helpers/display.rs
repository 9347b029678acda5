// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for prompt-forge
// ABOUTME: Consistent rendering of presets, chats, messages and connection status

use prompt_forge::cache::CacheSource;
use prompt_forge::llm::ConnectionStatus;
use prompt_forge::models::{Chat, Message, Preset};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// One line per preset, marking the default pointer
pub fn display_presets(presets: &[Preset], default_id: Option<&str>) {
    if presets.is_empty() {
        println!("No presets.");
        return;
    }
    for preset in presets {
        let marker = if default_id == Some(preset.id.as_str()) { "*" } else { " " };
        println!(
            "{marker} {:<36}  {:<24}  {}",
            preset.id, preset.name, preset.task_type
        );
    }
}

/// Preset details after a change
pub fn display_preset(action: &str, preset: &Preset) {
    println!("{action} preset '{}' ({})", preset.name, preset.id);
    println!("   Task: {}", preset.task_type);
    println!("   Updated: {}", preset.updated_at.format(TIME_FORMAT));
}

/// One line per chat
pub fn display_chats(chats: &[Chat]) {
    if chats.is_empty() {
        println!("No chats yet.");
        return;
    }
    for chat in chats {
        println!(
            "{:<36}  {}  {}",
            chat.id,
            chat.updated_at.format(TIME_FORMAT),
            chat.title
        );
    }
}

/// A chat transcript
pub fn display_messages(chat: &Chat, messages: &[Message]) {
    println!("{}", chat.title);
    println!("{}", "=".repeat(chat.title.chars().count().clamp(8, 80)));
    for message in messages {
        println!(
            "\n[{}] {}",
            message.role,
            message.created_at.format(TIME_FORMAT)
        );
        println!("{}", message.content);
    }
}

/// Connection check result with a hint for each failure
pub fn display_status(status: &ConnectionStatus) {
    println!("{status}");
    let hint = match status {
        ConnectionStatus::Ok { .. } => return,
        ConnectionStatus::NotConfigured => {
            "Run `prompt-forge config set-model --model <name>` first."
        }
        ConnectionStatus::Unreachable { .. } => "Is the runtime running? Try `ollama serve`.",
        ConnectionStatus::Timeout => "The runtime is slow to answer; try again shortly.",
        ConnectionStatus::NoModelsFound => "Pull a model first, e.g. `ollama pull llama3`.",
        ConnectionStatus::ModelNotFound { .. } => {
            "Pull the model or pick one of the available models."
        }
        _ => return,
    };
    println!("Hint: {hint}");
}

/// Short label for where a composition came from
pub const fn source_label(source: CacheSource) -> &'static str {
    match source {
        CacheSource::Memory => "memory cache",
        CacheSource::Session => "session cache",
        CacheSource::Composed => "composed",
    }
}

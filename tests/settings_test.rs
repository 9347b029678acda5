// ABOUTME: Tests for the flat settings document
// ABOUTME: Local model config validation, default provider flag, system prompt and preset pointer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{fast_store_config, init_test_logging};
use prompt_forge::errors::ErrorCode;
use prompt_forge::llm::LocalModelConfig;
use prompt_forge::prompts::DEFAULT_SYSTEM_PROMPT;
use prompt_forge::store::SettingsStore;
use std::path::Path;

fn settings(dir: &Path) -> SettingsStore {
    init_test_logging();
    SettingsStore::open(dir, fast_store_config())
}

fn model_config(base_url: &str) -> LocalModelConfig {
    LocalModelConfig {
        provider: "ollama".into(),
        base_url: base_url.into(),
        model: "llama3".into(),
    }
}

#[tokio::test]
async fn test_local_model_config_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = settings(dir.path());
    assert!(settings.local_model_config().await?.is_none());

    settings
        .save_local_model_config(&model_config("http://localhost:11434/"))
        .await?;

    let saved = settings.local_model_config().await?.unwrap();
    assert_eq!(saved.base_url, "http://localhost:11434");
    assert_eq!(saved.model, "llama3");
    assert_eq!(
        settings.get_string("localModel.provider").await?.as_deref(),
        Some("ollama")
    );
    Ok(())
}

#[tokio::test]
async fn test_non_loopback_base_url_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = settings(dir.path());

    for url in ["http://192.168.1.20:11434", "https://api.example.com", "ftp://127.0.0.1"] {
        let error = settings
            .save_local_model_config(&model_config(url))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigInvalid, "{url}");
    }
    assert!(settings.local_model_config().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_partial_model_config_is_not_configured() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = settings(dir.path());
    settings
        .set_value("localModel.model", serde_json::json!("llama3"))
        .await?;
    assert!(settings.local_model_config().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_default_provider_flag() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = settings(dir.path());
    assert!(!settings.is_default_provider().await?);
    settings.set_default_provider(true).await?;
    assert!(settings.is_default_provider().await?);
    Ok(())
}

#[tokio::test]
async fn test_system_prompt_override_and_reset() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = settings(dir.path());
    assert_eq!(settings.system_prompt().await?, DEFAULT_SYSTEM_PROMPT.trim());

    settings.set_system_prompt(Some("Answer like a pirate.")).await?;
    assert_eq!(settings.system_prompt().await?, "Answer like a pirate.");

    settings.set_system_prompt(Some("   ")).await?;
    assert_eq!(settings.system_prompt().await?, DEFAULT_SYSTEM_PROMPT.trim());

    settings.set_system_prompt(None).await?;
    assert!(settings.get_value("prompt.systemPrompt").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_default_preset_pointer_is_per_user() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let settings = settings(dir.path());
    settings.set_default_preset_id("alice", "p1").await?;
    settings.set_default_preset_id("bob", "p2").await?;

    assert_eq!(settings.default_preset_id("alice").await?.as_deref(), Some("p1"));
    assert_eq!(settings.default_preset_id("bob").await?.as_deref(), Some("p2"));
    assert!(settings.default_preset_id("carol").await?.is_none());
    assert_eq!(settings.all().await?.len(), 2);
    Ok(())
}

// ABOUTME: Local model configuration commands for prompt-forge
// ABOUTME: Saves loopback-validated runtime settings and prints the effective configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use prompt_forge::errors::AppResult;
use prompt_forge::llm::LocalModelConfig;
use prompt_forge::studio::PromptStudio;
use tracing::info;

type Result<T> = AppResult<T>;

/// Save the local model settings
pub async fn set_model(
    studio: &PromptStudio,
    provider: String,
    base_url: String,
    model: String,
    make_default: bool,
) -> Result<()> {
    let config = LocalModelConfig {
        provider,
        base_url,
        model,
    };
    studio.settings().save_local_model_config(&config).await?;
    studio.settings().set_default_provider(make_default).await?;
    info!(model = %config.model, "local model saved");
    println!(
        "Saved {} model '{}' at {}",
        config.provider, config.model, config.base_url
    );
    Ok(())
}

/// Print directories, model settings and the system prompt source
pub async fn show(studio: &PromptStudio) -> Result<()> {
    let config = studio.config();
    println!("Data directory:    {}", config.data_dir.display());
    println!("Session directory: {}", config.session_dir.display());
    println!(
        "Cache capacity:    {} in memory, {} in session",
        config.cache.memory_capacity, config.cache.session_capacity
    );
    println!("Messages per chat: {}", config.message_cap);

    match studio.settings().local_model_config().await? {
        Some(model) => {
            println!("Model provider:    {}", model.provider);
            println!("Model base URL:    {}", model.base_url);
            println!("Model name:        {}", model.model);
        }
        None => println!("Model:             not configured"),
    }
    println!(
        "Default provider:  {}",
        studio.settings().is_default_provider().await?
    );
    let stats = studio.cache_stats();
    println!(
        "Cache this run:    {} memory hits, {} session hits, {} misses",
        stats.memory_hits, stats.session_hits, stats.misses
    );
    Ok(())
}

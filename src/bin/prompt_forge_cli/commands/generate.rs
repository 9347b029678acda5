// ABOUTME: Compose, generate and connectivity commands for prompt-forge
// ABOUTME: Rejections are printed as guidance; model failures come back as errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use prompt_forge::cache::CacheMode;
use prompt_forge::errors::AppResult;
use prompt_forge::studio::PromptStudio;
use tracing::info;

use crate::helpers::display::{display_status, source_label};
use crate::helpers::options::OptionArgs;

type Result<T> = AppResult<T>;

/// Print the composed prompt
pub async fn compose(
    studio: &PromptStudio,
    user: &str,
    input: &str,
    args: &OptionArgs,
    no_cache: bool,
) -> Result<()> {
    let options = args.resolve(studio, user).await?;
    let mode = if no_cache { CacheMode::Skip } else { CacheMode::Use };
    let (composition, source) = studio.compose(input, &options, mode).await;
    info!(source = source_label(source), "composition ready");
    println!("{}", composition.text());
    Ok(())
}

/// Run a full generation and print the reply
pub async fn generate(
    studio: &PromptStudio,
    user: &str,
    input: &str,
    chat: Option<&str>,
    args: &OptionArgs,
) -> Result<()> {
    let options = args.resolve(studio, user).await?;
    let outcome = studio.generate(user, chat, input, &options).await?;
    println!("{}", outcome.output);
    eprintln!(
        "\nchat {} ({}), {}",
        outcome.chat.id,
        outcome.chat.title,
        source_label(outcome.source)
    );
    Ok(())
}

/// Check the configured local model is reachable
pub async fn check(studio: &PromptStudio) -> Result<()> {
    let status = studio.check_connection().await;
    display_status(&status);
    Ok(())
}

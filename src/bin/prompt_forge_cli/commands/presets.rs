// ABOUTME: Preset management commands for prompt-forge
// ABOUTME: Handles list, create, duplicate and delete for the current user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use prompt_forge::errors::AppResult;
use prompt_forge::models::GenerationOptions;
use prompt_forge::studio::PromptStudio;
use tracing::info;

use crate::helpers::display::{display_preset, display_presets};
use crate::helpers::options::OptionArgs;

type Result<T> = AppResult<T>;

/// List the user's presets
pub async fn list(studio: &PromptStudio, user: &str) -> Result<()> {
    let presets = studio.presets().list_for_user(user).await?;
    let default = studio.presets().default_preset(user).await?;
    display_presets(&presets, Some(default.id.as_str()));
    Ok(())
}

/// Save a new preset from flags
pub async fn create(studio: &PromptStudio, user: &str, name: &str, args: &OptionArgs) -> Result<()> {
    let base = match &args.preset {
        Some(id) => studio.presets().get(user, id).await?.options,
        None => GenerationOptions::default(),
    };
    let options = args.apply(base)?;
    let preset = studio.presets().create(user, name, options).await?;
    info!(preset_id = %preset.id, "preset created");
    display_preset("Created", &preset);
    Ok(())
}

/// Copy a preset
pub async fn duplicate(
    studio: &PromptStudio,
    user: &str,
    preset_id: &str,
    name: Option<&str>,
) -> Result<()> {
    let copy = studio.presets().duplicate(user, preset_id, name).await?;
    display_preset("Duplicated", &copy);
    Ok(())
}

/// Delete a preset
pub async fn delete(studio: &PromptStudio, user: &str, preset_id: &str) -> Result<()> {
    studio.presets().delete(user, preset_id).await?;
    println!("Deleted preset {preset_id}");
    Ok(())
}

// ABOUTME: Per-user preset management with unique names and a protected default preset
// ABOUTME: The default-preset pointer is kept in the settings document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::StoreConfig;
use crate::constants::presets::DEFAULT_PRESET_NAME;
use crate::constants::store::collections;
use crate::errors::{AppError, AppResult};
use crate::models::{is_default_name, GenerationOptions, Preset};
use crate::store::{Entity, JsonStore, SettingsStore};
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

impl Entity for Preset {
    const COLLECTION: &'static str = collections::PRESETS;

    fn id(&self) -> &str {
        &self.id
    }
}

fn name_taken(
    data: &BTreeMap<String, Preset>,
    user_id: &str,
    name: &str,
    except: Option<&str>,
) -> bool {
    data.values()
        .any(|p| p.user_id == user_id && p.has_name(name) && except != Some(p.id.as_str()))
}

fn validated_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid_input("Preset name cannot be empty"));
    }
    Ok(name.to_owned())
}

fn owned_by<'a>(
    data: &'a mut BTreeMap<String, Preset>,
    user_id: &str,
    id: &str,
) -> AppResult<&'a mut Preset> {
    data.get_mut(id)
        .filter(|p| p.user_id == user_id)
        .ok_or_else(|| AppError::not_found(format!("Preset '{id}'")))
}

/// Presets first by default-ness, then by name
fn display_order(a: &Preset, b: &Preset) -> Ordering {
    b.is_default()
        .cmp(&a.is_default())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Preset CRUD for one data directory
pub struct PresetService {
    store: JsonStore<Preset>,
    settings: Arc<SettingsStore>,
}

impl PresetService {
    /// Service over `presets.json` in `dir`
    #[must_use]
    pub fn open(dir: &Path, config: StoreConfig, settings: Arc<SettingsStore>) -> Self {
        Self {
            store: JsonStore::open(dir, config),
            settings,
        }
    }

    /// The user's "Default" preset, created on first use
    ///
    /// Also repairs the default-preset pointer if it is missing or dangling.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the presets or settings cannot be written
    pub async fn ensure_default(&self, user_id: &str) -> AppResult<Preset> {
        let existing = self
            .store
            .find(|p| p.user_id == user_id && p.is_default())
            .await?
            .into_iter()
            .next();

        let preset = if let Some(preset) = existing {
            preset
        } else {
            let owner = user_id.to_owned();
            self.store
                .mutate(move |data| {
                    if let Some(found) = data
                        .values()
                        .find(|p| p.user_id == owner && p.is_default())
                    {
                        return Ok(found.clone());
                    }
                    let preset = Preset::new(
                        owner.as_str(),
                        DEFAULT_PRESET_NAME,
                        GenerationOptions::default(),
                    );
                    data.insert(preset.id.clone(), preset.clone());
                    info!(user_id = %owner, preset_id = %preset.id, "created default preset");
                    Ok(preset)
                })
                .await?
        };

        let pointer = self.settings.default_preset_id(user_id).await?;
        let dangling = match pointer.as_deref() {
            None => true,
            Some(id) => self.get(user_id, id).await.is_err(),
        };
        if dangling {
            self.settings.set_default_preset_id(user_id, &preset.id).await?;
        }
        Ok(preset)
    }

    /// Save a new preset
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name, `ResourceAlreadyExists` if the
    /// user already has a preset with that name (trimmed, case-insensitive),
    /// or a storage error
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        options: GenerationOptions,
    ) -> AppResult<Preset> {
        let name = validated_name(name)?;
        self.ensure_default(user_id).await?;
        let preset = Preset::new(user_id, name, options);
        self.store
            .mutate(move |data| {
                if name_taken(data, &preset.user_id, &preset.name, None) {
                    return Err(AppError::conflict(format!(
                        "A preset named '{}' already exists",
                        preset.name
                    )));
                }
                data.insert(preset.id.clone(), preset.clone());
                Ok(preset)
            })
            .await
    }

    /// Copy a preset under `new_name`, or "<name> (copy)" with a counter if taken
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown preset, `ResourceAlreadyExists`
    /// if an explicit `new_name` is taken, or a storage error
    pub async fn duplicate(
        &self,
        user_id: &str,
        id: &str,
        new_name: Option<&str>,
    ) -> AppResult<Preset> {
        let explicit = new_name.map(validated_name).transpose()?;
        let user_id = user_id.to_owned();
        let id = id.to_owned();
        self.store
            .mutate(move |data| {
                let source = owned_by(data, &user_id, &id)?.clone();
                let name = match explicit {
                    Some(name) if name_taken(data, &user_id, &name, None) => {
                        return Err(AppError::conflict(format!(
                            "A preset named '{name}' already exists"
                        )));
                    }
                    Some(name) => name,
                    None => {
                        let base = format!("{} (copy)", source.name);
                        let mut candidate = base.clone();
                        let mut counter = 2;
                        while name_taken(data, &user_id, &candidate, None) {
                            candidate = format!("{} (copy {counter})", source.name);
                            counter += 1;
                        }
                        candidate
                    }
                };
                let copy = Preset::new(user_id.as_str(), name, source.options);
                data.insert(copy.id.clone(), copy.clone());
                Ok(copy)
            })
            .await
    }

    /// Replace a preset's options; allowed for the default preset
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown preset, or a storage error
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        options: GenerationOptions,
    ) -> AppResult<Preset> {
        let user_id = user_id.to_owned();
        let id = id.to_owned();
        self.store
            .mutate(move |data| {
                let preset = owned_by(data, &user_id, &id)?;
                preset.set_options(options);
                Ok(preset.clone())
            })
            .await
    }

    /// Rename a preset
    ///
    /// # Errors
    ///
    /// Returns `ResourceProtected` when renaming the default preset,
    /// `ResourceAlreadyExists` if the name is taken, `ResourceNotFound` for an
    /// unknown preset, or a storage error
    pub async fn rename(&self, user_id: &str, id: &str, name: &str) -> AppResult<Preset> {
        let name = validated_name(name)?;
        let user_id = user_id.to_owned();
        let id = id.to_owned();
        self.store
            .mutate(move |data| {
                if owned_by(data, &user_id, &id)?.is_default() {
                    return Err(AppError::protected("The Default preset cannot be renamed"));
                }
                if is_default_name(&name) || name_taken(data, &user_id, &name, Some(&id)) {
                    return Err(AppError::conflict(format!(
                        "A preset named '{name}' already exists"
                    )));
                }
                let preset = owned_by(data, &user_id, &id)?;
                preset.name = name;
                preset.updated_at = Utc::now();
                Ok(preset.clone())
            })
            .await
    }

    /// Delete a preset; the default pointer falls back to "Default" if it pointed here
    ///
    /// # Errors
    ///
    /// Returns `ResourceProtected` for the default preset, `ResourceNotFound`
    /// for an unknown preset, or a storage error
    pub async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        let owner = user_id.to_owned();
        let target = id.to_owned();
        self.store
            .mutate(move |data| {
                if owned_by(data, &owner, &target)?.is_default() {
                    return Err(AppError::protected("The Default preset cannot be deleted"));
                }
                data.remove(&target);
                Ok(())
            })
            .await?;

        if self.settings.default_preset_id(user_id).await?.as_deref() == Some(id) {
            let fallback = self.ensure_default(user_id).await?;
            self.settings
                .set_default_preset_id(user_id, &fallback.id)
                .await?;
        }
        Ok(())
    }

    /// The user's presets, "Default" first then by name
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Preset>> {
        self.ensure_default(user_id).await?;
        let mut presets = self.store.find(|p| p.user_id == user_id).await?;
        presets.sort_by(display_order);
        Ok(presets)
    }

    /// One of the user's presets
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if it does not exist or belongs to someone else
    pub async fn get(&self, user_id: &str, id: &str) -> AppResult<Preset> {
        self.store
            .get(id)
            .await?
            .filter(|p| p.user_id == user_id)
            .ok_or_else(|| AppError::not_found(format!("Preset '{id}'")))
    }

    /// Preset the default pointer refers to
    ///
    /// # Errors
    ///
    /// Returns a storage error
    pub async fn default_preset(&self, user_id: &str) -> AppResult<Preset> {
        let fallback = self.ensure_default(user_id).await?;
        match self.settings.default_preset_id(user_id).await? {
            Some(id) => Ok(self.get(user_id, &id).await.unwrap_or(fallback)),
            None => Ok(fallback),
        }
    }

    /// Point the user's default at `id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown preset, or a storage error
    pub async fn set_default(&self, user_id: &str, id: &str) -> AppResult<Preset> {
        let preset = self.get(user_id, id).await?;
        self.settings.set_default_preset_id(user_id, &preset.id).await?;
        Ok(preset)
    }
}

// ABOUTME: Flat key/value settings document (settings.json) on top of the JSON store
// ABOUTME: Local model config, default-provider flag, per-user default preset and system prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Entity, JsonStore};
use crate::config::StoreConfig;
use crate::constants::{settings_keys, store::collections};
use crate::errors::AppResult;
use crate::llm::LocalModelConfig;
use crate::prompts::DEFAULT_SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// One setting; its key doubles as the record id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingEntry {
    /// Dotted settings key
    pub key: String,
    /// Stored value
    pub value: Value,
}

impl Entity for SettingEntry {
    const COLLECTION: &'static str = collections::SETTINGS;

    fn id(&self) -> &str {
        &self.key
    }
}

/// Typed access to the settings document
pub struct SettingsStore {
    store: JsonStore<SettingEntry>,
}

impl SettingsStore {
    /// Settings stored in `dir/settings.json`
    #[must_use]
    pub fn open(dir: &Path, config: StoreConfig) -> Self {
        Self {
            store: JsonStore::open(dir, config),
        }
    }

    /// Raw value for `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read
    pub async fn get_value(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.store.get(key).await?.map(|entry| entry.value))
    }

    /// String value for `key`; non-string values read as absent
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read
    pub async fn get_string(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .get_value(key)
            .await?
            .and_then(|value| value.as_str().map(str::to_owned)))
    }

    /// Store `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub async fn set_value(&self, key: &str, value: Value) -> AppResult<()> {
        self.store
            .put(SettingEntry {
                key: key.to_owned(),
                value,
            })
            .await?;
        Ok(())
    }

    /// Delete `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub async fn remove(&self, key: &str) -> AppResult<()> {
        self.store.remove(key).await?;
        Ok(())
    }

    /// Every stored setting, ordered by key
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read
    pub async fn all(&self) -> AppResult<Vec<SettingEntry>> {
        self.store.list().await
    }

    /// Local model configuration, if provider, base URL and model are all set
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read
    pub async fn local_model_config(&self) -> AppResult<Option<LocalModelConfig>> {
        let provider = self.get_string(settings_keys::MODEL_PROVIDER).await?;
        let base_url = self.get_string(settings_keys::MODEL_BASE_URL).await?;
        let model = self.get_string(settings_keys::MODEL_NAME).await?;
        Ok(match (provider, base_url, model) {
            (Some(provider), Some(base_url), Some(model)) => Some(LocalModelConfig {
                provider,
                base_url,
                model,
            }),
            _ => None,
        })
    }

    /// Save the local model configuration in one write
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the base URL is not a loopback address,
    /// or a storage error if the write fails
    pub async fn save_local_model_config(&self, config: &LocalModelConfig) -> AppResult<()> {
        config.validate()?;
        let entries = [
            (settings_keys::MODEL_PROVIDER, config.provider.clone()),
            (
                settings_keys::MODEL_BASE_URL,
                config.base_url.trim_end_matches('/').to_owned(),
            ),
            (settings_keys::MODEL_NAME, config.model.clone()),
        ];
        self.store
            .mutate(move |data| {
                for (key, value) in entries {
                    data.insert(
                        key.to_owned(),
                        SettingEntry {
                            key: key.to_owned(),
                            value: Value::String(value),
                        },
                    );
                }
                Ok(())
            })
            .await
    }

    /// Whether the local model is the default provider
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read
    pub async fn is_default_provider(&self) -> AppResult<bool> {
        Ok(self
            .get_value(settings_keys::DEFAULT_PROVIDER)
            .await?
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    /// Mark the local model as (not) the default provider
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub async fn set_default_provider(&self, enabled: bool) -> AppResult<()> {
        self.set_value(settings_keys::DEFAULT_PROVIDER, Value::Bool(enabled))
            .await
    }

    fn default_preset_key(user_id: &str) -> String {
        format!("{}{user_id}", settings_keys::DEFAULT_PRESET_PREFIX)
    }

    /// Id of the user's default preset
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read
    pub async fn default_preset_id(&self, user_id: &str) -> AppResult<Option<String>> {
        self.get_string(&Self::default_preset_key(user_id)).await
    }

    /// Point the user's default preset at `preset_id`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub async fn set_default_preset_id(&self, user_id: &str, preset_id: &str) -> AppResult<()> {
        self.set_value(
            &Self::default_preset_key(user_id),
            Value::String(preset_id.to_owned()),
        )
        .await
    }

    /// System prompt in effect: the user's override, or the built-in prompt
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document cannot be read
    pub async fn system_prompt(&self) -> AppResult<String> {
        Ok(self
            .get_string(settings_keys::SYSTEM_PROMPT)
            .await?
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.trim().to_owned()))
    }

    /// Override the system prompt, or restore the built-in one with `None`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub async fn set_system_prompt(&self, prompt: Option<&str>) -> AppResult<()> {
        match prompt {
            Some(prompt) => {
                self.set_value(settings_keys::SYSTEM_PROMPT, Value::String(prompt.to_owned()))
                    .await
            }
            None => self.remove(settings_keys::SYSTEM_PROMPT).await,
        }
    }
}

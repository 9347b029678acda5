// ABOUTME: Orchestrates one generation: cached composition, model call, version and chat history
// ABOUTME: Owns the stores, the prompt pipeline and the in-session version history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Studio
//!
//! [`PromptStudio`] is the single entry point front ends talk to. A call to
//! [`PromptStudio::generate`] runs the whole flow:
//!
//! 1. compose the prompt through the cache
//! 2. return the rejection message, or send the prompt to the local model
//! 3. record the input and output as a [`Version`]
//! 4. append the user and assistant messages to the chat
//!
//! Model failures are returned before anything is written, so a failed call
//! leaves history untouched.

use crate::cache::{CacheMode, CacheSource, CacheStats, PromptPipeline};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::llm::{ConnectionStatus, GenerateOptions, LocalModelClient, ModelClient};
use crate::models::{title_from_input, Chat, GenerationOptions, MessageRole};
use crate::prompts::{Composer, Composition, PromptComposer, Rejection, DEFAULT_SYSTEM_PROMPT};
use crate::services::{ChatService, PresetService};
use crate::store::SettingsStore;
use crate::versions::{Version, VersionHistory};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// What one call to [`PromptStudio::generate`] produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// Chat the exchange was appended to
    pub chat: Chat,
    /// Text shown to the user
    pub output: String,
    /// Why the input was not sent, if it was not
    pub rejection: Option<Rejection>,
    /// Which cache tier supplied the composition
    pub source: CacheSource,
    /// Recorded version
    pub version: Version,
}

/// Application facade wiring configuration, stores, cache and model client
pub struct PromptStudio {
    config: AppConfig,
    settings: Arc<SettingsStore>,
    presets: PresetService,
    chats: ChatService,
    pipeline: PromptPipeline,
    history: Mutex<VersionHistory>,
    model_override: Option<Arc<dyn ModelClient>>,
}

impl PromptStudio {
    /// Studio over the directories in `config`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a classifier pattern does not compile
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let composer: Arc<dyn Composer> = Arc::new(PromptComposer::new(&config.classifier)?);
        let settings = Arc::new(SettingsStore::open(&config.data_dir, config.store.clone()));
        let presets = PresetService::open(&config.data_dir, config.store.clone(), settings.clone());
        let chats = ChatService::open(&config.data_dir, config.store.clone(), config.message_cap);
        let pipeline = PromptPipeline::new(
            composer,
            &config.cache,
            &config.session_dir,
            config.store.clone(),
        );
        Ok(Self {
            config,
            settings,
            presets,
            chats,
            pipeline,
            history: Mutex::new(VersionHistory::default()),
            model_override: None,
        })
    }

    /// Use `client` instead of building one from the saved settings
    #[must_use]
    pub fn with_model_client(mut self, client: Arc<dyn ModelClient>) -> Self {
        self.model_override = Some(client);
        self
    }

    /// Loaded configuration
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Settings document
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Preset service
    #[must_use]
    pub const fn presets(&self) -> &PresetService {
        &self.presets
    }

    /// Chat service
    #[must_use]
    pub const fn chats(&self) -> &ChatService {
        &self.chats
    }

    /// Cache counters
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.pipeline.stats()
    }

    async fn system_prompt(&self) -> String {
        match self.settings.system_prompt().await {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(error = %e, "could not read system prompt, using built-in");
                DEFAULT_SYSTEM_PROMPT.trim().to_owned()
            }
        }
    }

    /// Compose `input` without calling the model
    pub async fn compose(
        &self,
        input: &str,
        options: &GenerationOptions,
        mode: CacheMode,
    ) -> (Composition, CacheSource) {
        let system_prompt = self.system_prompt().await;
        self.pipeline
            .lookup(input, options, &system_prompt, mode)
            .await
    }

    async fn model_client(&self) -> AppResult<Arc<dyn ModelClient>> {
        if let Some(client) = &self.model_override {
            return Ok(client.clone());
        }
        let saved = self.settings.local_model_config().await?;
        Ok(Arc::new(LocalModelClient::new(saved, self.config.model)?))
    }

    /// Check the configured local model is reachable
    pub async fn check_connection(&self) -> ConnectionStatus {
        match self.model_client().await {
            Ok(client) => client.check_connection().await,
            Err(e) => {
                warn!(error = %e, "model client unavailable");
                ConnectionStatus::NotConfigured
            }
        }
    }

    /// Run one generation for `user_id`, appending to `chat_id` or a new chat
    ///
    /// # Errors
    ///
    /// Returns model client errors (not configured, unreachable, timeout,
    /// model not found) before anything is recorded, `ResourceNotFound` for
    /// an unknown chat, or a storage error
    #[instrument(skip(self, input, options), fields(task = %options.task_type()))]
    pub async fn generate(
        &self,
        user_id: &str,
        chat_id: Option<&str>,
        input: &str,
        options: &GenerationOptions,
    ) -> AppResult<GenerationOutcome> {
        let existing = match chat_id {
            Some(id) => Some(self.chats.get_chat(user_id, id).await?),
            None => None,
        };

        let (composition, source) = self.compose(input, options, CacheMode::Use).await;
        let (output, rejection) = match composition {
            Composition::Rejected(rejection) => (rejection.message().to_owned(), Some(rejection)),
            Composition::Prompt(prompt) => {
                let client = self.model_client().await?;
                let reply = client
                    .generate(&prompt, &GenerateOptions::from(options))
                    .await?;
                (reply, None)
            }
        };

        let chat = match existing {
            Some(chat) => chat,
            None => {
                self.chats
                    .create_chat(user_id, Some(&title_from_input(input)))
                    .await?
            }
        };

        self.chats
            .append_messages(
                user_id,
                &chat.id,
                &[
                    (MessageRole::User, input),
                    (MessageRole::Assistant, output.as_str()),
                ],
            )
            .await?;
        let version = self.history.lock().await.push(input, output.clone());
        let chat = self.chats.get_chat(user_id, &chat.id).await?;

        info!(
            chat_id = %chat.id,
            rejected = rejection.is_some(),
            source = ?source,
            "generation recorded"
        );
        Ok(GenerationOutcome {
            chat,
            output,
            rejection,
            source,
            version,
        })
    }

    /// Versions recorded this session, newest first
    pub async fn versions(&self) -> Vec<Version> {
        self.history.lock().await.list()
    }

    /// Forget the session's versions
    pub async fn clear_versions(&self) {
        self.history.lock().await.clear();
    }
}

// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet logging, fast store tuning, temp-dir configs and stand-in collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `prompt_forge`

use async_trait::async_trait;
use prompt_forge::config::{AppConfig, StoreConfig};
use prompt_forge::llm::{ConnectionStatus, GenerateOptions, ModelClient, ModelClientError};
use prompt_forge::models::GenerationOptions;
use prompt_forge::prompts::{Composer, Composition};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Store tuning with short lock waits so contention tests finish quickly
pub fn fast_store_config() -> StoreConfig {
    StoreConfig {
        lock_retries: 2_000,
        lock_retry_delay: Duration::from_millis(2),
        lock_stale_after: Duration::from_secs(30),
        read_cache_ttl: Duration::from_millis(2_000),
    }
}

/// Configuration rooted in a temp directory
pub fn test_config(dir: &Path) -> AppConfig {
    init_test_logging();
    let mut config = AppConfig::with_data_dir(dir);
    config.store = fast_store_config();
    config
}

/// Composer that counts calls and echoes its arguments
#[derive(Default)]
pub struct CountingComposer {
    calls: AtomicUsize,
}

impl CountingComposer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Composer for CountingComposer {
    fn compose(
        &self,
        input: &str,
        options: &GenerationOptions,
        system_prompt: &str,
    ) -> Composition {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Composition::Prompt(format!(
            "{system_prompt}|{}|{}|#{n}",
            options.task_type(),
            input.trim()
        ))
    }
}

/// Model client returning a canned reply or a canned failure
pub struct ScriptedModel {
    reply: Mutex<Result<String, String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Mutex::new(Ok(reply.to_owned())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every generation fails as if the runtime were down
    pub fn unreachable() -> Self {
        Self {
            reply: Mutex::new(Err("connection refused".to_owned())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerateOptions,
    ) -> Result<String, ModelClientError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.reply
            .lock()
            .unwrap()
            .clone()
            .map_err(|reason| ModelClientError::Unreachable {
                base_url: "http://127.0.0.1:11434".to_owned(),
                reason,
            })
    }

    async fn check_connection(&self) -> ConnectionStatus {
        ConnectionStatus::Ok {
            model: "scripted".to_owned(),
        }
    }
}

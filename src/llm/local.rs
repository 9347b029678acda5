// ABOUTME: HTTP client for an Ollama-compatible runtime on the loopback interface
// ABOUTME: One in-flight request per call, a hard timeout, and no automatic retries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    ConnectionStatus, GenerateOptions, LocalModelConfig, ModelClient, ModelClientError,
    ResponseCleaner,
};
use crate::config::ModelTimeouts;
use crate::constants::model::{ERROR_BODY_PREVIEW_CHARS, GENERATE_ENDPOINT, TAGS_ENDPOINT};
use crate::errors::{AppError, AppResult};
use crate::models::OutputFormat;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Body of `POST /api/generate`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<RuntimeOptions>,
}

#[derive(Debug, Serialize)]
struct RuntimeOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

impl TagEntry {
    fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}

/// Model names compare equal with or without an explicit `:latest` tag
fn same_model(a: &str, b: &str) -> bool {
    let strip = |name: &str| name.trim().trim_end_matches(":latest").to_lowercase();
    strip(a) == strip(b)
}

/// Client for the configured local runtime
///
/// Constructed even when no model is configured so callers get a
/// `NotConfigured` condition from `generate` rather than a setup failure.
pub struct LocalModelClient {
    client: Client,
    config: Option<LocalModelConfig>,
    timeouts: ModelTimeouts,
    cleaner: ResponseCleaner,
}

impl LocalModelClient {
    /// Create a client for `config`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the base URL is not a loopback address, or
    /// an internal error if the HTTP client cannot be built
    pub fn new(config: Option<LocalModelConfig>, timeouts: ModelTimeouts) -> AppResult<Self> {
        if let Some(config) = &config {
            config.validate()?;
        }
        let client = Client::builder()
            .connect_timeout(timeouts.check)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        if let Some(config) = &config {
            info!(
                provider = %config.provider,
                base_url = %config.base_url,
                model = %config.model,
                "local model client ready"
            );
        }

        Ok(Self {
            client,
            config,
            timeouts,
            cleaner: ResponseCleaner::new()?,
        })
    }

    /// Configuration in use, if any
    #[must_use]
    pub const fn config(&self) -> Option<&LocalModelConfig> {
        self.config.as_ref()
    }

    fn api_url(config: &LocalModelConfig, endpoint: &str) -> String {
        format!("{}/{endpoint}", config.base_url.trim_end_matches('/'))
    }

    /// Clean raw model output for `format`
    #[must_use]
    pub fn post_process(&self, raw: &str, format: Option<OutputFormat>) -> String {
        self.cleaner.post_process(raw, format)
    }

    fn send_error(config: &LocalModelConfig, limit: Duration, e: &reqwest::Error) -> ModelClientError {
        if e.is_timeout() {
            ModelClientError::Timeout { after: limit }
        } else {
            ModelClientError::Unreachable {
                base_url: config.base_url.clone(),
                reason: e.to_string(),
            }
        }
    }

    fn protocol_error(status: reqwest::StatusCode, body: &str) -> ModelClientError {
        ModelClientError::Protocol {
            status: status.as_u16(),
            body: body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
        }
    }

    /// Run `exchange` under a hard timeout; dropping the future abandons the request
    async fn with_timeout<T, F>(limit: Duration, exchange: F) -> Result<T, ModelClientError>
    where
        F: Future<Output = Result<T, ModelClientError>>,
    {
        tokio::time::timeout(limit, exchange)
            .await
            .map_err(|_| ModelClientError::Timeout { after: limit })?
    }

    async fn generate_raw(
        &self,
        config: &LocalModelConfig,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ModelClientError> {
        let request = GenerateRequest {
            model: &config.model,
            prompt,
            stream: false,
            options: options
                .temperature
                .map(|temperature| RuntimeOptions { temperature }),
        };

        let response = self
            .client
            .post(Self::api_url(config, GENERATE_ENDPOINT))
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::send_error(config, self.timeouts.generate, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::send_error(config, self.timeouts.generate, &e))?;

        if status == reqwest::StatusCode::NOT_FOUND && body.contains("not found") {
            return Err(ModelClientError::ModelNotFound {
                model: config.model.clone(),
            });
        }
        if !status.is_success() {
            return Err(Self::protocol_error(status, &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| ModelClientError::MalformedResponse(e.to_string()))?;
        Ok(parsed.response)
    }

    async fn list_models(&self, config: &LocalModelConfig) -> Result<Vec<String>, ModelClientError> {
        let response = self
            .client
            .get(Self::api_url(config, TAGS_ENDPOINT))
            .send()
            .await
            .map_err(|e| Self::send_error(config, self.timeouts.check, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::send_error(config, self.timeouts.check, &e))?;
        if !status.is_success() {
            return Err(Self::protocol_error(status, &body));
        }

        let tags: TagsResponse = serde_json::from_str(&body)
            .map_err(|e| ModelClientError::MalformedResponse(e.to_string()))?;
        Ok(tags
            .models
            .iter()
            .filter_map(TagEntry::label)
            .map(str::to_owned)
            .collect())
    }
}

#[async_trait]
impl ModelClient for LocalModelClient {
    #[instrument(skip(self, prompt, options), fields(prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ModelClientError> {
        let config = self.config.as_ref().ok_or(ModelClientError::NotConfigured)?;
        debug!(model = %config.model, temperature = ?options.temperature, "sending generation request");

        let raw = Self::with_timeout(
            self.timeouts.generate,
            self.generate_raw(config, prompt, options),
        )
        .await
        .inspect_err(|e| warn!(model = %config.model, error = %e, "generation failed"))?;

        debug!(model = %config.model, response_len = raw.len(), "generation finished");
        Ok(self.cleaner.post_process(&raw, options.format))
    }

    #[instrument(skip(self))]
    async fn check_connection(&self) -> ConnectionStatus {
        let Some(config) = self.config.as_ref() else {
            return ConnectionStatus::NotConfigured;
        };

        match Self::with_timeout(self.timeouts.check, self.list_models(config)).await {
            Ok(models) if models.is_empty() => ConnectionStatus::NoModelsFound,
            Ok(models) => {
                if models.iter().any(|name| same_model(name, &config.model)) {
                    ConnectionStatus::Ok {
                        model: config.model.clone(),
                    }
                } else {
                    ConnectionStatus::ModelNotFound {
                        model: config.model.clone(),
                        available: models,
                    }
                }
            }
            Err(ModelClientError::Timeout { .. }) => ConnectionStatus::Timeout,
            Err(e) => {
                debug!(error = %e, "connectivity check failed");
                ConnectionStatus::Unreachable {
                    base_url: config.base_url.clone(),
                }
            }
        }
    }
}

// ABOUTME: Local model runtime integration: configuration, client trait, errors and status types
// ABOUTME: The only network hop in the system is a loopback HTTP call to the model runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Local Model Runtime
//!
//! Composed prompts are sent to an on-machine runtime speaking the Ollama
//! HTTP API:
//!
//! - `POST {base}/api/generate` with `{model, prompt, stream: false, options: {temperature}}`
//! - `GET {base}/api/tags` for the connectivity check
//!
//! Base URLs are restricted to loopback hosts.

/// HTTP client for the local runtime
pub mod local;
/// Clean-up of raw model output
pub mod post_process;

pub use local::LocalModelClient;
pub use post_process::ResponseCleaner;

use crate::errors::{AppError, ErrorCode};
use crate::models::{GenerationOptions, OutputFormat};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use url::{Host, Url};

/// Connection settings for the local runtime, persisted in settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalModelConfig {
    /// Runtime identifier, e.g. "ollama"
    pub provider: String,
    /// Runtime base URL; must be a loopback address
    pub base_url: String,
    /// Model name as known to the runtime
    pub model: String,
}

impl LocalModelConfig {
    /// Check that `base_url` parses and points at a loopback host
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` otherwise
    pub fn validate(&self) -> Result<Url, ModelClientError> {
        validate_loopback_url(&self.base_url)
    }
}

/// Parse `raw` and accept it only for `http`/`https` on `localhost`,
/// `127.0.0.0/8` or `::1`
///
/// # Errors
///
/// Returns `InvalidBaseUrl` describing the first failed check
pub fn validate_loopback_url(raw: &str) -> Result<Url, ModelClientError> {
    let invalid = |reason: &str| ModelClientError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: reason.to_owned(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    let loopback = match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
        Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
        None => false,
    };
    if !loopback {
        return Err(invalid("host must be localhost, 127.0.0.0/8 or ::1"));
    }
    Ok(url)
}

/// Per-call generation settings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerateOptions {
    /// Sampling temperature forwarded to the runtime
    pub temperature: Option<f32>,
    /// Requested output format, drives post-processing
    pub format: Option<OutputFormat>,
}

impl From<&GenerationOptions> for GenerateOptions {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            temperature: options.common.temperature,
            format: options.common.format,
        }
    }
}

/// Result of the connectivity check
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConnectionStatus {
    /// Runtime answered and lists the configured model
    Ok {
        /// Configured model
        model: String,
    },
    /// No local model settings saved
    NotConfigured,
    /// Nothing listening at the base URL
    Unreachable {
        /// Base URL tried
        base_url: String,
    },
    /// Runtime did not answer in time
    Timeout,
    /// Runtime has no models installed
    NoModelsFound,
    /// Runtime answered but does not have the configured model
    ModelNotFound {
        /// Configured model
        model: String,
        /// Models the runtime does have
        available: Vec<String>,
    },
}

impl ConnectionStatus {
    /// Whether generation can proceed
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok { model } => write!(f, "connected, model '{model}' is available"),
            Self::NotConfigured => f.write_str("local model is not configured"),
            Self::Unreachable { base_url } => write!(f, "nothing is listening at {base_url}"),
            Self::Timeout => f.write_str("the local runtime did not answer in time"),
            Self::NoModelsFound => f.write_str("the local runtime has no models installed"),
            Self::ModelNotFound { model, available } => write!(
                f,
                "model '{model}' is not installed (available: {})",
                available.join(", ")
            ),
        }
    }
}

/// Failures talking to the local runtime
#[derive(Debug, thiserror::Error)]
pub enum ModelClientError {
    /// No local model settings saved
    #[error("local model is not configured")]
    NotConfigured,

    /// Base URL is malformed or not a loopback address
    #[error("'{url}' is not an allowed local model URL: {reason}")]
    InvalidBaseUrl {
        /// Rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Connection failed
    #[error("cannot reach the local model runtime at {base_url}: {reason}")]
    Unreachable {
        /// Base URL tried
        base_url: String,
        /// Transport error
        reason: String,
    },

    /// No answer within the hard timeout
    #[error("the local model runtime did not answer within {}s", after.as_secs())]
    Timeout {
        /// Timeout that elapsed
        after: Duration,
    },

    /// Runtime answered with a non-2xx status
    #[error("the local model runtime returned HTTP {status}: {body}")]
    Protocol {
        /// HTTP status code
        status: u16,
        /// Start of the response body
        body: String,
    },

    /// Runtime answered 2xx with an unexpected body
    #[error("unexpected response from the local model runtime: {0}")]
    MalformedResponse(String),

    /// Runtime does not have the configured model
    #[error("model '{model}' is not installed in the local runtime")]
    ModelNotFound {
        /// Configured model
        model: String,
    },
}

impl ModelClientError {
    /// One-line advice for the user
    #[must_use]
    pub const fn guidance(&self) -> &'static str {
        match self {
            Self::NotConfigured => "Run `prompt-forge config set-model` to choose a local model.",
            Self::InvalidBaseUrl { .. } => {
                "Use a loopback URL such as http://localhost:11434 for the local runtime."
            }
            Self::Unreachable { .. } => "Start the local model runtime (for example `ollama serve`).",
            Self::Timeout { .. } => {
                "The model may still be loading; try again or raise PROMPT_FORGE_MODEL_TIMEOUT_SECS."
            }
            Self::Protocol { .. } | Self::MalformedResponse(_) => {
                "Check the runtime logs; the request reached it but failed."
            }
            Self::ModelNotFound { .. } => "Pull the model first (for example `ollama pull <model>`).",
        }
    }
}

impl From<ModelClientError> for AppError {
    fn from(error: ModelClientError) -> Self {
        let code = match &error {
            ModelClientError::NotConfigured => ErrorCode::ConfigMissing,
            ModelClientError::InvalidBaseUrl { .. } => ErrorCode::ConfigInvalid,
            ModelClientError::Unreachable { .. } => ErrorCode::ExternalServiceUnavailable,
            ModelClientError::Timeout { .. } => ErrorCode::ExternalTimeout,
            ModelClientError::Protocol { .. } | ModelClientError::MalformedResponse(_) => {
                ErrorCode::ExternalServiceError
            }
            ModelClientError::ModelNotFound { .. } => ErrorCode::ResourceNotFound,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Text generation against a model runtime
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a reply for `prompt` and post-process it for `options.format`
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, ModelClientError>;

    /// Report whether the runtime is reachable and has the configured model
    async fn check_connection(&self) -> ConnectionStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_urls_accepted() {
        for url in [
            "http://localhost:11434",
            "http://127.0.0.1:11434/",
            "http://127.8.9.10",
            "https://[::1]:8080",
            "http://LOCALHOST",
        ] {
            assert!(validate_loopback_url(url).is_ok(), "{url}");
        }
    }

    #[test]
    fn test_remote_urls_rejected() {
        for url in [
            "http://192.168.1.20:11434",
            "http://example.com",
            "ftp://localhost",
            "localhost:11434",
            "http://localhost.evil.com",
        ] {
            assert!(
                matches!(
                    validate_loopback_url(url),
                    Err(ModelClientError::InvalidBaseUrl { .. })
                ),
                "{url}"
            );
        }
    }

    #[test]
    fn test_error_codes() {
        let error = AppError::from(ModelClientError::Timeout {
            after: Duration::from_secs(60),
        });
        assert_eq!(error.code, ErrorCode::ExternalTimeout);
        let error = AppError::from(ModelClientError::NotConfigured);
        assert_eq!(error.code, ErrorCode::ConfigMissing);
    }
}

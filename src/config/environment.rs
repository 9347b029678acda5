// ABOUTME: Environment-based application configuration with per-section defaults
// ABOUTME: Resolves data and session directories, cache capacities, lock tuning and model timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::classifier::ClassifierConfig;
use crate::constants::{cache, limits, model, service_names, store};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Composition cache sizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries kept in the in-memory tier
    pub memory_capacity: usize,
    /// Entries kept in the session tier
    pub session_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_capacity: cache::DEFAULT_MEMORY_CAPACITY,
            session_capacity: cache::DEFAULT_SESSION_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Load cache configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            memory_capacity: env_parse_or(
                "PROMPT_FORGE_CACHE_CAPACITY",
                cache::DEFAULT_MEMORY_CAPACITY,
            ),
            session_capacity: env_parse_or(
                "PROMPT_FORGE_SESSION_CAPACITY",
                cache::DEFAULT_SESSION_CAPACITY,
            ),
        }
    }
}

/// Document store locking and read-cache tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Attempts to create the lock file before giving up
    pub lock_retries: u32,
    /// Pause between lock attempts
    pub lock_retry_delay: Duration,
    /// Lock files older than this are treated as abandoned
    pub lock_stale_after: Duration,
    /// How long a parsed document is trusted without checking its mtime
    pub read_cache_ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_retries: store::DEFAULT_LOCK_RETRIES,
            lock_retry_delay: Duration::from_millis(store::DEFAULT_LOCK_RETRY_MS),
            lock_stale_after: Duration::from_secs(store::DEFAULT_LOCK_STALE_SECS),
            read_cache_ttl: Duration::from_millis(store::DEFAULT_READ_CACHE_TTL_MS),
        }
    }
}

impl StoreConfig {
    /// Load store configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            lock_retries: env_parse_or("PROMPT_FORGE_LOCK_RETRIES", store::DEFAULT_LOCK_RETRIES),
            lock_retry_delay: Duration::from_millis(env_parse_or(
                "PROMPT_FORGE_LOCK_RETRY_MS",
                store::DEFAULT_LOCK_RETRY_MS,
            )),
            lock_stale_after: Duration::from_secs(env_parse_or(
                "PROMPT_FORGE_LOCK_STALE_SECS",
                store::DEFAULT_LOCK_STALE_SECS,
            )),
            read_cache_ttl: Duration::from_millis(env_parse_or(
                "PROMPT_FORGE_STORE_CACHE_TTL_MS",
                store::DEFAULT_READ_CACHE_TTL_MS,
            )),
        }
    }
}

/// Local model runtime timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelTimeouts {
    /// Hard limit for one generation request
    pub generate: Duration,
    /// Hard limit for the connectivity check
    pub check: Duration,
}

impl Default for ModelTimeouts {
    fn default() -> Self {
        Self {
            generate: Duration::from_secs(model::DEFAULT_GENERATE_TIMEOUT_SECS),
            check: Duration::from_secs(model::DEFAULT_CHECK_TIMEOUT_SECS),
        }
    }
}

impl ModelTimeouts {
    /// Load model timeouts from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            generate: Duration::from_secs(env_parse_or(
                "PROMPT_FORGE_MODEL_TIMEOUT_SECS",
                model::DEFAULT_GENERATE_TIMEOUT_SECS,
            )),
            check: Duration::from_secs(env_parse_or(
                "PROMPT_FORGE_CHECK_TIMEOUT_SECS",
                model::DEFAULT_CHECK_TIMEOUT_SECS,
            )),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted document files
    pub data_dir: PathBuf,
    /// Directory holding the session-scoped composition cache
    pub session_dir: PathBuf,
    /// Composition cache sizing
    pub cache: CacheConfig,
    /// Document store tuning
    pub store: StoreConfig,
    /// Model runtime timeouts
    pub model: ModelTimeouts,
    /// Messages kept per chat
    pub message_cap: usize,
    /// Input screening rules
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be resolved, or if
    /// `PROMPT_FORGE_CLASSIFIER_FILE` names an unreadable or invalid file
    pub fn from_env() -> AppResult<Self> {
        let data_dir = match env::var("PROMPT_FORGE_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .map(|dir| dir.join(service_names::PROMPT_FORGE))
                .ok_or_else(|| {
                    AppError::config_missing(
                        "no platform data directory; set PROMPT_FORGE_DATA_DIR",
                    )
                })?,
        };

        let session_dir = env::var("PROMPT_FORGE_SESSION_DIR").map_or_else(
            |_| env::temp_dir().join(cache::SESSION_DIR_NAME),
            PathBuf::from,
        );

        let classifier = match env::var("PROMPT_FORGE_CLASSIFIER_FILE") {
            Ok(path) => ClassifierConfig::from_file(Path::new(&path))?,
            Err(_) => ClassifierConfig::default(),
        };

        Ok(Self {
            data_dir,
            session_dir,
            cache: CacheConfig::from_env(),
            store: StoreConfig::from_env(),
            model: ModelTimeouts::from_env(),
            message_cap: env_parse_or("PROMPT_FORGE_MESSAGE_CAP", limits::DEFAULT_MESSAGE_CAP),
            classifier,
        })
    }

    /// Default configuration rooted at `data_dir`, with the session cache
    /// in a `session` subdirectory
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            session_dir: data_dir.join("session"),
            data_dir,
            cache: CacheConfig::default(),
            store: StoreConfig::default(),
            model: ModelTimeouts::default(),
            message_cap: limits::DEFAULT_MESSAGE_CAP,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or malformed
fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, fallback = %default, "ignoring malformed setting");
            default
        }),
        Err(_) => default,
    }
}

// ABOUTME: Tests for environment-driven configuration and logging setup
// ABOUTME: Defaults, overrides, malformed values and classifier files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use prompt_forge::config::{AppConfig, CacheConfig, ClassifierConfig, StoreConfig};
use prompt_forge::errors::ErrorCode;
use prompt_forge::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: &[&str] = &[
    "PROMPT_FORGE_DATA_DIR",
    "PROMPT_FORGE_SESSION_DIR",
    "PROMPT_FORGE_CACHE_CAPACITY",
    "PROMPT_FORGE_SESSION_CAPACITY",
    "PROMPT_FORGE_MESSAGE_CAP",
    "PROMPT_FORGE_MODEL_TIMEOUT_SECS",
    "PROMPT_FORGE_CHECK_TIMEOUT_SECS",
    "PROMPT_FORGE_LOCK_RETRIES",
    "PROMPT_FORGE_LOCK_RETRY_MS",
    "PROMPT_FORGE_LOCK_STALE_SECS",
    "PROMPT_FORGE_STORE_CACHE_TTL_MS",
    "PROMPT_FORGE_CLASSIFIER_FILE",
    "LOG_FORMAT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults() -> Result<()> {
    clear_env();
    env::set_var("PROMPT_FORGE_DATA_DIR", "/tmp/prompt-forge-test-data");

    let config = AppConfig::from_env()?;
    assert_eq!(config.data_dir.to_str(), Some("/tmp/prompt-forge-test-data"));
    assert!(config.session_dir.ends_with("prompt-forge-session"));
    assert_eq!(config.cache, CacheConfig::default());
    assert_eq!(config.store, StoreConfig::default());
    assert_eq!(config.message_cap, 50);
    assert_eq!(config.model.generate, Duration::from_secs(60));
    assert_eq!(config.model.check, Duration::from_secs(5));
    assert_eq!(config.store.lock_retries, 50);
    assert_eq!(config.store.lock_retry_delay, Duration::from_millis(100));
    assert_eq!(config.store.lock_stale_after, Duration::from_secs(10));
    assert_eq!(config.store.read_cache_ttl, Duration::from_millis(2_000));
    clear_env();
    Ok(())
}

#[test]
#[serial]
fn test_overrides_and_malformed_values() -> Result<()> {
    clear_env();
    env::set_var("PROMPT_FORGE_DATA_DIR", "/tmp/pf-data");
    env::set_var("PROMPT_FORGE_SESSION_DIR", "/tmp/pf-session");
    env::set_var("PROMPT_FORGE_CACHE_CAPACITY", "16");
    env::set_var("PROMPT_FORGE_MESSAGE_CAP", " 8 ");
    env::set_var("PROMPT_FORGE_LOCK_RETRY_MS", "fast");
    env::set_var("PROMPT_FORGE_MODEL_TIMEOUT_SECS", "-3");

    let config = AppConfig::from_env()?;
    assert_eq!(config.session_dir.to_str(), Some("/tmp/pf-session"));
    assert_eq!(config.cache.memory_capacity, 16);
    assert_eq!(config.cache.session_capacity, 500);
    assert_eq!(config.message_cap, 8);
    assert_eq!(config.store.lock_retry_delay, Duration::from_millis(100));
    assert_eq!(config.model.generate, Duration::from_secs(60));
    clear_env();
    Ok(())
}

#[test]
#[serial]
fn test_classifier_file() -> Result<()> {
    clear_env();
    let dir = tempfile::tempdir()?;
    let good = dir.path().join("classifier.json");
    std::fs::write(&good, r#"{"minWords": 2, "conversationalPatterns": ["^yo$"]}"#)?;
    env::set_var("PROMPT_FORGE_DATA_DIR", dir.path());
    env::set_var("PROMPT_FORGE_CLASSIFIER_FILE", &good);

    let config = AppConfig::from_env()?;
    assert_eq!(config.classifier.min_words, 2);
    assert_eq!(config.classifier.conversational_patterns, ["^yo$"]);
    assert_eq!(
        config.classifier.injection_patterns,
        ClassifierConfig::default().injection_patterns
    );

    let bad = dir.path().join("broken.json");
    std::fs::write(&bad, "{ not json")?;
    env::set_var("PROMPT_FORGE_CLASSIFIER_FILE", &bad);
    assert_eq!(AppConfig::from_env().unwrap_err().code, ErrorCode::ConfigInvalid);

    env::set_var("PROMPT_FORGE_CLASSIFIER_FILE", dir.path().join("absent.json"));
    assert_eq!(AppConfig::from_env().unwrap_err().code, ErrorCode::ConfigInvalid);
    clear_env();
    Ok(())
}

#[test]
fn test_with_data_dir_keeps_session_inside() {
    let config = AppConfig::with_data_dir("/srv/pf");
    assert_eq!(config.session_dir.to_str(), Some("/srv/pf/session"));
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("LOG_FORMAT", "json");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Json);
    env::set_var("LOG_FORMAT", "whatever");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Compact);
    clear_env();
}

// ABOUTME: Two-tier composition cache keyed by a fingerprint of input and options
// ABOUTME: Bounded LRU in memory, then a session-scoped JSON document on disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Composition Cache
//!
//! Composing a prompt is deterministic, so identical requests are answered
//! from cache:
//!
//! 1. [`memory::MemoryTier`] holds recent compositions and evicts the least
//!    recently used entry once full.
//! 2. [`session::SessionTier`] persists compositions under the session
//!    directory so they survive a restart of the front end within one run.
//!
//! [`pipeline::PromptPipeline`] ties both tiers to a [`Composer`](crate::prompts::Composer).
//! Cache failures never surface to callers; they are logged and the request
//! falls through to direct composition.

/// Bounded in-memory LRU tier
pub mod memory;
/// Cache-aside composition entry point
pub mod pipeline;
/// Session-persisted tier
pub mod session;

pub use memory::MemoryTier;
pub use pipeline::PromptPipeline;
pub use session::{SessionEntry, SessionTier};

use crate::constants::cache::FINGERPRINT_VERSION;
use crate::models::GenerationOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Whether a lookup may use cached compositions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read and populate both tiers
    #[default]
    Use,
    /// Bypass both tiers and always recompose
    Skip,
}

/// Where a composition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheSource {
    /// In-memory tier
    Memory,
    /// Session tier
    Session,
    /// Freshly composed
    Composed,
}

/// Counters since the pipeline was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Lookups answered by the memory tier
    pub memory_hits: u64,
    /// Lookups answered by the session tier
    pub session_hits: u64,
    /// Lookups that had to compose
    pub misses: u64,
}

/// Stable cache key for `input` under `options`
///
/// The input is trimmed first, so surrounding whitespace never changes the
/// key. Options are serialized with object keys sorted and null members
/// dropped, so the key does not depend on field order.
#[must_use]
pub fn fingerprint(input: &str, options: &GenerationOptions) -> String {
    let options = serde_json::to_value(options).unwrap_or(Value::Null);
    let payload = serde_json::json!({
        "version": FINGERPRINT_VERSION,
        "input": input.trim(),
        "taskType": options.get("taskType").cloned().unwrap_or(Value::Null),
        "options": options,
    });
    let mut canonical = String::new();
    write_canonical(&payload, &mut canonical);
    sha256_hex(&canonical)
}

/// Hex SHA-256 of `text`
#[must_use]
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, _)| k)
                .collect();
            keys.sort();
            out.push('{');
            for (index, key) in keys.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                if let Some(member) = map.get(key) {
                    write_canonical(member, out);
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

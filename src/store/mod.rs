// ABOUTME: JSON document store: one file per entity collection, guarded by an advisory lock file
// ABOUTME: Defines the Entity trait, the on-disk document shape and store-specific errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Document Store
//!
//! Each collection lives in `<data_dir>/<collection>.json`:
//!
//! ```json
//! { "data": { "<id>": { ... } }, "lastModified": 1735689600000, "version": "1.0" }
//! ```
//!
//! Writers serialize through an in-process FIFO queue, then take a sibling
//! `<collection>.json.lock` file created with `create_new`. Files are replaced
//! by writing `<collection>.json.tmp` and renaming it over the target, so
//! readers never observe a partial write and never need the lock.

/// Generic per-collection JSON store
pub mod document;
/// Cross-process advisory lock file
pub mod lock;
/// Flat key/value settings document
pub mod settings;

pub use document::JsonStore;
pub use lock::AdvisoryLock;
pub use settings::SettingsStore;

use crate::errors::{AppError, ErrorCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// A record persisted in a [`JsonStore`]
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the file stem
    const COLLECTION: &'static str;

    /// Key of this record in the collection
    fn id(&self) -> &str;
}

/// On-disk shape of a collection file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
)]
pub struct Document<T> {
    /// Records keyed by id; `null` reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: BTreeMap<String, T>,
    /// Epoch milliseconds of the last write
    #[serde(default)]
    pub last_modified: i64,
    /// Document format version
    #[serde(default)]
    pub version: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<BTreeMap<String, T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Storage-layer failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A document could not be serialized
    #[error("cannot serialize {collection}: {source}")]
    Serialization {
        /// Collection being written
        collection: &'static str,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Another writer kept the lock for every attempt
    #[error("lock {} still held after {attempts} attempts", path.display())]
    LockTimeout {
        /// Lock file path
        path: PathBuf,
        /// Attempts made
        attempts: u32,
    },

    /// A document exists but is not valid JSON of the expected shape
    #[error("{} is not a valid document: {reason}", path.display())]
    Corrupt {
        /// Document path
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        let code = match &error {
            StoreError::Io { .. } | StoreError::Corrupt { .. } => ErrorCode::StorageError,
            StoreError::Serialization { .. } => ErrorCode::SerializationError,
            StoreError::LockTimeout { .. } => ErrorCode::ResourceLocked,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

// ABOUTME: Generic JSON-file-backed collection with queued, locked, atomic read-modify-write
// ABOUTME: Reads are served from a short-lived cache validated against the file's mtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AdvisoryLock, Document, Entity, StoreError};
use crate::config::StoreConfig;
use crate::constants::store::{DOCUMENT_VERSION, LOCK_EXTENSION, TMP_EXTENSION};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Suffix for a quarantined unreadable document
const CORRUPT_EXTENSION: &str = "corrupt";

#[derive(Debug)]
enum DiskState {
    Missing,
    Valid,
    /// Empty file or a bare `null`
    Null,
    Corrupt(String),
}

struct DiskRead<T> {
    data: BTreeMap<String, T>,
    modified: Option<SystemTime>,
    state: DiskState,
}

impl<T> DiskRead<T> {
    const fn empty(state: DiskState, modified: Option<SystemTime>) -> Self {
        Self {
            data: BTreeMap::new(),
            modified,
            state,
        }
    }
}

struct CachedDocument<T> {
    data: BTreeMap<String, T>,
    modified: Option<SystemTime>,
    checked_at: Instant,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRef<'a, T> {
    data: &'a BTreeMap<String, T>,
    last_modified: i64,
    version: &'static str,
}

/// Persistent map of `T` records backed by a single JSON file
///
/// Mutations run one at a time in submission order within this handle, and
/// under the advisory lock across handles and processes. Each mutation
/// re-reads the file after taking the lock, so writers never overwrite each
/// other's changes.
pub struct JsonStore<T: Entity> {
    path: PathBuf,
    config: StoreConfig,
    queue: Mutex<()>,
    cache: RwLock<Option<CachedDocument<T>>>,
}

impl<T: Entity> JsonStore<T> {
    /// Store for `T::COLLECTION` inside `dir`
    #[must_use]
    pub fn open(dir: &Path, config: StoreConfig) -> Self {
        Self::at_path(dir.join(format!("{}.json", T::COLLECTION)), config)
    }

    /// Store backed by an explicit file path
    #[must_use]
    pub fn at_path(path: PathBuf, config: StoreConfig) -> Self {
        Self {
            path,
            config,
            queue: Mutex::new(()),
            cache: RwLock::new(None),
        }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, extension: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }

    /// All records, ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read
    pub async fn list(&self) -> AppResult<Vec<T>> {
        Ok(self.snapshot().await?.into_values().collect())
    }

    /// One record by id
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read
    pub async fn get(&self, id: &str) -> AppResult<Option<T>> {
        Ok(self.snapshot().await?.remove(id))
    }

    /// Records matching `predicate`, ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read
    pub async fn find<P>(&self, predicate: P) -> AppResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self
            .snapshot()
            .await?
            .into_values()
            .filter(|entity| predicate(entity))
            .collect())
    }

    /// Add a new record
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the id is taken, or a storage error
    pub async fn insert(&self, entity: T) -> AppResult<T> {
        self.mutate(move |data| {
            if data.contains_key(entity.id()) {
                return Err(AppError::conflict(format!(
                    "{} '{}' already exists",
                    T::COLLECTION,
                    entity.id()
                )));
            }
            data.insert(entity.id().to_owned(), entity.clone());
            Ok(entity)
        })
        .await
    }

    /// Insert or replace a record
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub async fn put(&self, entity: T) -> AppResult<T> {
        self.mutate(move |data| {
            data.insert(entity.id().to_owned(), entity.clone());
            Ok(entity)
        })
        .await
    }

    /// Change one record in place; `f` must not change the id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, any error from `f`
    /// (nothing is written in that case), or a storage error
    pub async fn update<F>(&self, id: &str, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut T) -> AppResult<()> + Send,
    {
        let id = id.to_owned();
        self.mutate(move |data| {
            let entity = data
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found(format!("{} '{id}'", T::COLLECTION)))?;
            f(entity)?;
            Ok(entity.clone())
        })
        .await
    }

    /// Delete a record, returning it if it existed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails
    pub async fn remove(&self, id: &str) -> AppResult<Option<T>> {
        let id = id.to_owned();
        self.mutate(move |data| Ok(data.remove(&id))).await
    }

    /// Read-modify-write under one lock acquisition
    ///
    /// `f` sees the current on-disk state. If it returns an error the file
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Returns any error from `f`, `ResourceLocked` if the lock cannot be
    /// taken, or a storage error if reading or writing fails
    pub async fn mutate<R, F>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut BTreeMap<String, T>) -> AppResult<R> + Send,
        R: Send,
    {
        let _turn = self.queue.lock().await;
        let _lock = AdvisoryLock::acquire(&self.sibling(LOCK_EXTENSION), &self.config).await?;

        let read = self.read_disk().await?;
        if let DiskState::Corrupt(reason) = &read.state {
            self.quarantine(reason).await?;
        }

        let mut data = read.data;
        let result = f(&mut data)?;
        self.write_atomic(&data).await?;
        self.invalidate().await;
        debug!(collection = T::COLLECTION, records = data.len(), "document saved");
        Ok(result)
    }

    /// Drop the read cache so the next read goes to disk
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    async fn snapshot(&self) -> AppResult<BTreeMap<String, T>> {
        {
            let mut cache = self.cache.write().await;
            if let Some(cached) = cache.as_mut() {
                if cached.checked_at.elapsed() < self.config.read_cache_ttl {
                    return Ok(cached.data.clone());
                }
                let current = file_modified(&self.path).await;
                if current.is_some() && current == cached.modified {
                    cached.checked_at = Instant::now();
                    return Ok(cached.data.clone());
                }
            }
        }

        let read = self.read_disk().await?;
        if matches!(read.state, DiskState::Null) {
            self.repair_null().await;
        }
        *self.cache.write().await = Some(CachedDocument {
            data: read.data.clone(),
            modified: read.modified,
            checked_at: Instant::now(),
        });
        Ok(read.data)
    }

    async fn read_disk(&self) -> AppResult<DiskRead<T>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(DiskRead::empty(DiskState::Missing, None));
            }
            Err(e) => return Err(StoreError::io(&self.path, e).into()),
        };
        let modified = file_modified(&self.path).await;

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            warn!(path = %self.path.display(), "document is empty or null");
            return Ok(DiskRead::empty(DiskState::Null, modified));
        }

        match serde_json::from_str::<Document<T>>(trimmed) {
            Ok(document) => Ok(DiskRead {
                data: document.data,
                modified,
                state: DiskState::Valid,
            }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "document is corrupt, reading as empty");
                Ok(DiskRead::empty(DiskState::Corrupt(e.to_string()), modified))
            }
        }
    }

    async fn repair_null(&self) {
        match self.mutate(|_| Ok(())).await {
            Ok(()) => warn!(path = %self.path.display(), "repaired null document"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not repair null document"),
        }
    }

    /// Keep an unreadable file aside before it is overwritten
    ///
    /// If the backup cannot be made the write is refused, so the unreadable
    /// file stays in place.
    async fn quarantine(&self, reason: &str) -> Result<(), StoreError> {
        let backup = self.sibling(CORRUPT_EXTENSION);
        match fs::rename(&self.path, &backup).await {
            Ok(()) => {
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    reason,
                    "moved corrupt document aside"
                );
                Ok(())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not back up corrupt document");
                Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    reason: reason.to_owned(),
                })
            }
        }
    }

    async fn write_atomic(&self, data: &BTreeMap<String, T>) -> Result<(), StoreError> {
        let document = DocumentRef {
            data,
            last_modified: Utc::now().timestamp_millis(),
            version: DOCUMENT_VERSION,
        };
        let bytes =
            serde_json::to_vec_pretty(&document).map_err(|source| StoreError::Serialization {
                collection: T::COLLECTION,
                source,
            })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.sibling(TMP_EXTENSION);
        let written = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await?;
            fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                debug!(path = %tmp.display(), error = %cleanup, "no temp file to clean up");
            }
            return Err(StoreError::io(&self.path, e));
        }
        Ok(())
    }
}

async fn file_modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).await.ok()?.modified().ok()
}

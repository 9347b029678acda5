// ABOUTME: Session-scoped composition tier persisted as a JSON document in the session directory
// ABOUTME: Keeps the newest entries up to a capacity; every failure is logged and swallowed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::StoreConfig;
use crate::constants::cache::SESSION_COLLECTION;
use crate::prompts::Composition;
use crate::store::{Entity, JsonStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// One persisted composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    /// Cache key
    pub id: String,
    /// Cached result
    pub composition: Composition,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

impl Entity for SessionEntry {
    const COLLECTION: &'static str = SESSION_COLLECTION;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Persisted tier of the composition cache
pub struct SessionTier {
    store: JsonStore<SessionEntry>,
    capacity: usize,
}

impl SessionTier {
    /// Tier stored under `dir`, keeping at most `capacity` entries
    #[must_use]
    pub fn open(dir: &Path, capacity: usize, config: StoreConfig) -> Self {
        Self {
            store: JsonStore::open(dir, config),
            capacity: capacity.max(1),
        }
    }

    /// Cached composition, or `None` on a miss or a read failure
    pub async fn get(&self, key: &str) -> Option<Composition> {
        match self.store.get(key).await {
            Ok(entry) => entry.map(|entry| entry.composition),
            Err(e) => {
                warn!(error = %e, "session cache read failed");
                None
            }
        }
    }

    /// Persist a composition; failures are logged only
    pub async fn put(&self, key: String, composition: Composition) {
        let capacity = self.capacity;
        let entry = SessionEntry {
            id: key,
            composition,
            stored_at: Utc::now(),
        };
        let result = self
            .store
            .mutate(move |data| {
                data.insert(entry.id.clone(), entry);
                while data.len() > capacity {
                    let oldest = data
                        .values()
                        .min_by_key(|e| e.stored_at)
                        .map(|e| e.id.clone());
                    match oldest {
                        Some(id) => {
                            data.remove(&id);
                        }
                        None => break,
                    }
                }
                Ok(())
            })
            .await;
        if let Err(e) = result {
            warn!(error = %e, "session cache write failed");
        }
    }

    /// Number of persisted entries; zero if unreadable
    pub async fn len(&self) -> usize {
        self.store.list().await.map_or(0, |entries| entries.len())
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

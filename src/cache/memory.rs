// ABOUTME: Bounded in-memory composition tier with least-recently-used eviction
// ABOUTME: Lives for the lifetime of the process and is shared behind an async mutex
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::cache::DEFAULT_MEMORY_CAPACITY;
use crate::prompts::Composition;
use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;

/// In-memory LRU of compositions keyed by fingerprint
pub struct MemoryTier {
    entries: Mutex<LruCache<String, Composition>>,
}

impl MemoryTier {
    const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MEMORY_CAPACITY) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    };

    /// Tier holding at most `capacity` entries; zero falls back to the default
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::FALLBACK_CAPACITY);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached composition, marking it most recently used
    pub async fn get(&self, key: &str) -> Option<Composition> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Store a composition, evicting the least recently used entry if full
    pub async fn put(&self, key: String, composition: Composition) {
        self.entries.lock().await.put(key, composition);
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_evicts_least_recently_used() {
        let tier = MemoryTier::new(2);
        tier.put("a".into(), Composition::Prompt("A".into())).await;
        tier.put("b".into(), Composition::Prompt("B".into())).await;
        assert!(tier.get("a").await.is_some());
        tier.put("c".into(), Composition::Prompt("C".into())).await;

        assert!(tier.get("b").await.is_none());
        assert!(tier.get("a").await.is_some());
        assert_eq!(tier.len().await, 2);
    }

    #[tokio::test]
    async fn test_zero_capacity_uses_default() {
        let tier = MemoryTier::new(0);
        tier.put("a".into(), Composition::Prompt("A".into())).await;
        assert!(!tier.is_empty().await);
    }
}

// ABOUTME: Cache-aside composition: memory tier, then session tier, then the composer
// ABOUTME: Session hits are promoted to memory and fresh compositions are written to both
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{fingerprint, sha256_hex, CacheMode, CacheSource, CacheStats, MemoryTier, SessionTier};
use crate::config::{CacheConfig, StoreConfig};
use crate::models::GenerationOptions;
use crate::prompts::{Composer, Composition};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Composer wrapped in the two cache tiers
pub struct PromptPipeline {
    composer: Arc<dyn Composer>,
    memory: MemoryTier,
    session: SessionTier,
    memory_hits: AtomicU64,
    session_hits: AtomicU64,
    misses: AtomicU64,
}

impl PromptPipeline {
    /// Pipeline with its session tier stored under `session_dir`
    #[must_use]
    pub fn new(
        composer: Arc<dyn Composer>,
        cache: &CacheConfig,
        session_dir: &Path,
        store: StoreConfig,
    ) -> Self {
        Self {
            composer,
            memory: MemoryTier::new(cache.memory_capacity),
            session: SessionTier::open(session_dir, cache.session_capacity, store),
            memory_hits: AtomicU64::new(0),
            session_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Composition for `input`, from cache when allowed
    pub async fn get_or_compute(
        &self,
        input: &str,
        options: &GenerationOptions,
        system_prompt: &str,
        mode: CacheMode,
    ) -> Composition {
        self.lookup(input, options, system_prompt, mode).await.0
    }

    /// Like [`Self::get_or_compute`], also reporting which tier answered
    #[instrument(skip_all, fields(task = %options.task_type(), mode = ?mode))]
    pub async fn lookup(
        &self,
        input: &str,
        options: &GenerationOptions,
        system_prompt: &str,
        mode: CacheMode,
    ) -> (Composition, CacheSource) {
        if mode == CacheMode::Skip {
            return (
                self.composer.compose(input, options, system_prompt),
                CacheSource::Composed,
            );
        }

        // System prompt and screening rules can change between runs while
        // the session tier survives, so both are part of the key
        let key = format!(
            "{}.{}.{}",
            fingerprint(input, options),
            &sha256_hex(system_prompt.trim())[..16],
            self.composer.rules_digest()
        );

        if let Some(hit) = self.memory.get(&key).await {
            self.memory_hits.fetch_add(1, Ordering::Relaxed);
            debug!("composition served from memory");
            return (hit, CacheSource::Memory);
        }

        if let Some(hit) = self.session.get(&key).await {
            self.session_hits.fetch_add(1, Ordering::Relaxed);
            debug!("composition served from session cache");
            self.memory.put(key, hit.clone()).await;
            return (hit, CacheSource::Session);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let composition = self.composer.compose(input, options, system_prompt);
        self.memory.put(key.clone(), composition.clone()).await;
        self.session.put(key, composition.clone()).await;
        (composition, CacheSource::Composed)
    }

    /// Hit and miss counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            memory_hits: self.memory_hits.load(Ordering::Relaxed),
            session_hits: self.session_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop the memory tier; the session tier is kept
    pub async fn clear_memory(&self) {
        self.memory.clear().await;
    }

    /// Session tier, for inspection
    #[must_use]
    pub const fn session(&self) -> &SessionTier {
        &self.session
    }
}

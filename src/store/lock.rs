// ABOUTME: Advisory lock implemented as an exclusively-created sibling `.lock` file
// ABOUTME: Retries with a fixed delay, reclaims stale locks by age, and releases on drop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::StoreError;
use crate::config::StoreConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Held advisory lock; the lock file is removed when this is dropped
#[derive(Debug)]
pub struct AdvisoryLock {
    path: PathBuf,
}

impl AdvisoryLock {
    /// Create `path` exclusively, retrying while another writer holds it
    ///
    /// A lock file older than `config.lock_stale_after` is assumed to belong
    /// to a crashed writer and is removed before the next attempt.
    ///
    /// # Errors
    ///
    /// Returns `LockTimeout` once `config.lock_retries` attempts have failed,
    /// or `Io` for any filesystem error other than the file already existing
    pub async fn acquire(path: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let mut attempts = 0u32;
        loop {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .await
            {
                Ok(mut file) => {
                    let owner = format!("pid={}\n", std::process::id());
                    if let Err(e) = file.write_all(owner.as_bytes()).await {
                        debug!(path = %path.display(), error = %e, "could not record lock owner");
                    }
                    debug!(path = %path.display(), attempts, "lock acquired");
                    return Ok(Self {
                        path: path.to_path_buf(),
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    attempts += 1;
                    if attempts >= config.lock_retries {
                        warn!(path = %path.display(), attempts, "gave up waiting for lock");
                        return Err(StoreError::LockTimeout {
                            path: path.to_path_buf(),
                            attempts,
                        });
                    }
                    if !Self::reclaim_if_stale(path, config.lock_stale_after).await {
                        tokio::time::sleep(config.lock_retry_delay).await;
                    }
                }
                Err(e) => return Err(StoreError::io(path, e)),
            }
        }
    }

    /// Remove the lock file if it is at least `stale_after` old
    ///
    /// The stale file is first renamed to a unique claim name, so of several
    /// writers reclaiming at once only one removes it. If the claimed file
    /// turns out to be fresh, another writer replaced the stale lock in the
    /// meantime and it is put back.
    async fn reclaim_if_stale(path: &Path, stale_after: Duration) -> bool {
        match Self::age(path).await {
            Ok(age) if age < stale_after => return false,
            Ok(_) => {}
            // Released between our attempt and this check
            Err(e) if e.kind() == ErrorKind::NotFound => return true,
            Err(_) => return false,
        }

        let mut claim = path.as_os_str().to_owned();
        claim.push(format!(".stale-{}", Uuid::new_v4()));
        let claim = PathBuf::from(claim);
        match fs::rename(path, &claim).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not claim stale lock");
                return false;
            }
        }

        let reclaimed = match Self::age(&claim).await {
            Ok(age) if age < stale_after => {
                if let Err(e) = fs::hard_link(&claim, path).await {
                    warn!(path = %path.display(), error = %e, "could not restore live lock");
                }
                false
            }
            Ok(age) => {
                warn!(path = %path.display(), age_ms = age.as_millis(), "reclaimed stale lock");
                true
            }
            Err(_) => true,
        };
        if let Err(e) = fs::remove_file(&claim).await {
            debug!(path = %claim.display(), error = %e, "could not remove claimed lock");
        }
        reclaimed
    }

    async fn age(path: &Path) -> std::io::Result<Duration> {
        let modified = fs::metadata(path).await?.modified()?;
        Ok(SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default())
    }

    /// Path of the lock file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for AdvisoryLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to release lock");
            }
        }
    }
}

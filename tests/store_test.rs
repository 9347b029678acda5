// ABOUTME: Tests for the JSON document store and its advisory lock
// ABOUTME: CRUD, write serialization across handles, null repair, corruption and stale locks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{fast_store_config, init_test_logging};
use futures_util::future::join_all;
use prompt_forge::config::StoreConfig;
use prompt_forge::errors::{AppError, ErrorCode};
use prompt_forge::store::{AdvisoryLock, Entity, JsonStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    id: String,
    body: String,
}

impl Entity for Note {
    const COLLECTION: &'static str = "notes";

    fn id(&self) -> &str {
        &self.id
    }
}

fn note(id: &str, body: &str) -> Note {
    Note {
        id: id.to_owned(),
        body: body.to_owned(),
    }
}

fn store(dir: &Path) -> JsonStore<Note> {
    init_test_logging();
    JsonStore::open(dir, fast_store_config())
}

fn sibling(store: &JsonStore<Note>, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{extension}", store.path().display()))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_missing_file_reads_as_empty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store(dir.path());
    assert!(store.list().await?.is_empty());
    assert!(store.get("nope").await?.is_none());
    assert!(!store.path().exists());
    Ok(())
}

#[tokio::test]
async fn test_crud_and_document_shape() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store(dir.path());

    store.insert(note("b", "second")).await?;
    store.insert(note("a", "first")).await?;
    let duplicate = store.insert(note("a", "again")).await.unwrap_err();
    assert_eq!(duplicate.code, ErrorCode::ResourceAlreadyExists);

    let updated = store
        .update("a", |n| {
            n.body = "edited".into();
            Ok(())
        })
        .await?;
    assert_eq!(updated.body, "edited");
    let missing = store.update("zzz", |_| Ok(())).await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);

    let ids: Vec<String> = store.list().await?.into_iter().map(|n| n.id).collect();
    assert_eq!(ids, ["a", "b"]);

    assert_eq!(store.remove("b").await?, Some(note("b", "second")));
    assert_eq!(store.remove("b").await?, None);

    let document = read_json(store.path());
    assert_eq!(document["version"], "1.0");
    assert!(document["lastModified"].as_i64().unwrap() > 0);
    assert_eq!(document["data"]["a"]["body"], "edited");
    assert!(!sibling(&store, "lock").exists());
    assert!(!sibling(&store, "tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_failed_update_leaves_file_untouched() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store(dir.path());
    store.insert(note("a", "kept")).await?;
    let before = std::fs::read_to_string(store.path())?;

    let result = store
        .update("a", |n| {
            n.body = "lost".into();
            Err(AppError::invalid_input("rejected"))
        })
        .await;

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(store.path())?, before);
    assert_eq!(store.get("a").await?.unwrap().body, "kept");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_writes_on_one_handle_are_serialized() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(store(dir.path()));

    let writes = (0..25).map(|n| {
        let store = store.clone();
        async move { store.insert(note(&format!("n{n:02}"), "x")).await }
    });
    for result in join_all(writes).await {
        result?;
    }

    assert_eq!(store.list().await?.len(), 25);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_mutations_apply_in_submission_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(store(dir.path()));
    store.insert(note("log", "")).await?;

    let writes = (0..30).map(|n| {
        let store = store.clone();
        async move {
            store
                .mutate(move |data| {
                    let log = data
                        .get_mut("log")
                        .ok_or_else(|| AppError::not_found("log"))?;
                    log.body.push_str(&format!("{n},"));
                    Ok(())
                })
                .await
        }
    });
    for result in join_all(writes).await {
        result?;
    }

    let body = store.get("log").await?.unwrap().body;
    let applied: Vec<usize> = body
        .trim_end_matches(',')
        .split(',')
        .map(|n| n.parse().unwrap())
        .collect();
    assert_eq!(applied, (0..30).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn test_two_handles_do_not_lose_updates() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let first = Arc::new(store(dir.path()));
    let second = Arc::new(store(dir.path()));
    first.insert(note("counter", "0")).await?;

    let bump = |store: Arc<JsonStore<Note>>| async move {
        store
            .update("counter", |n| {
                let value: u32 = n.body.parse().unwrap();
                n.body = (value + 1).to_string();
                Ok(())
            })
            .await
    };
    let tasks: Vec<_> = (0..20)
        .map(|n| {
            let handle = if n % 2 == 0 { first.clone() } else { second.clone() };
            tokio::spawn(bump(handle))
        })
        .collect();
    for task in tasks {
        task.await??;
    }

    first.invalidate().await;
    assert_eq!(first.get("counter").await?.unwrap().body, "20");
    Ok(())
}

#[tokio::test]
async fn test_external_write_visible_after_invalidate() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let reader = store(dir.path());
    let writer = store(dir.path());

    assert!(reader.list().await?.is_empty());
    writer.insert(note("a", "from elsewhere")).await?;
    reader.invalidate().await;
    assert_eq!(reader.get("a").await?.unwrap().body, "from elsewhere");
    Ok(())
}

#[tokio::test]
async fn test_null_and_empty_files_are_repaired() -> Result<()> {
    for contents in ["null", "", "  \n"] {
        let dir = tempfile::tempdir()?;
        let store = store(dir.path());
        std::fs::write(store.path(), contents)?;

        assert!(store.list().await?.is_empty());

        let document = read_json(store.path());
        assert_eq!(document["data"], serde_json::json!({}));
        assert_eq!(document["version"], "1.0");
    }
    Ok(())
}

#[tokio::test]
async fn test_null_data_field_reads_as_empty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store(dir.path());
    std::fs::write(
        store.path(),
        r#"{"data": null, "lastModified": 0, "version": "1.0"}"#,
    )?;
    assert!(store.list().await?.is_empty());
    store.insert(note("a", "ok")).await?;
    assert_eq!(store.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_is_quarantined_on_write() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store(dir.path());
    std::fs::write(store.path(), "{\"data\": {\"a\": ")?;

    assert!(store.list().await?.is_empty());
    store.insert(note("b", "fresh")).await?;

    let backup = sibling(&store, "corrupt");
    assert_eq!(std::fs::read_to_string(backup)?, "{\"data\": {\"a\": ");
    assert_eq!(read_json(store.path())["data"]["b"]["body"], "fresh");
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_is_kept_when_backup_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store(dir.path());
    std::fs::write(store.path(), "{\"data\": {\"a\": ")?;
    // A non-empty directory where the backup should go
    let backup = sibling(&store, "corrupt");
    std::fs::create_dir(&backup)?;
    std::fs::write(backup.join("occupied"), "x")?;

    let error = store.insert(note("b", "fresh")).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::StorageError);
    assert!(error.message.contains("not a valid document"));
    assert_eq!(std::fs::read_to_string(store.path())?, "{\"data\": {\"a\": ");
    Ok(())
}

#[tokio::test]
async fn test_leftover_temp_file_is_harmless() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store(dir.path());
    store.insert(note("a", "committed")).await?;
    // A writer crashed between creating the temp file and renaming it
    std::fs::write(sibling(&store, "tmp"), "{\"data\": {\"half")?;

    store.invalidate().await;
    assert_eq!(store.get("a").await?.unwrap().body, "committed");
    store.insert(note("b", "next")).await?;
    assert!(!sibling(&store, "tmp").exists());
    assert_eq!(store.list().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_lock_timeout_keeps_foreign_lock() -> Result<()> {
    let dir = tempfile::tempdir()?;
    init_test_logging();
    let config = StoreConfig {
        lock_retries: 3,
        lock_retry_delay: Duration::from_millis(5),
        lock_stale_after: Duration::from_secs(3_600),
        ..fast_store_config()
    };
    let store: JsonStore<Note> = JsonStore::open(dir.path(), config);
    let lock = sibling(&store, "lock");
    std::fs::write(&lock, "pid=1")?;

    let error = store.insert(note("a", "blocked")).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceLocked);
    assert!(lock.exists());
    assert!(!store.path().exists());
    Ok(())
}

#[tokio::test]
async fn test_stale_lock_is_reclaimed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    init_test_logging();
    let config = StoreConfig {
        lock_retries: 3,
        lock_retry_delay: Duration::from_millis(5),
        lock_stale_after: Duration::from_millis(50),
        ..fast_store_config()
    };
    let store: JsonStore<Note> = JsonStore::open(dir.path(), config);
    std::fs::write(sibling(&store, "lock"), "pid=1")?;
    tokio::time::sleep(Duration::from_millis(120)).await;

    store.insert(note("a", "after crash")).await?;
    assert!(!sibling(&store, "lock").exists());
    assert_eq!(store.list().await?.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_reclaimers_never_share_the_lock() -> Result<()> {
    let dir = tempfile::tempdir()?;
    init_test_logging();
    let config = StoreConfig {
        lock_retries: 2_000,
        lock_retry_delay: Duration::from_millis(1),
        lock_stale_after: Duration::from_millis(200),
        ..fast_store_config()
    };
    let path = dir.path().join("shared.json.lock");
    std::fs::write(&path, "pid=1")?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let holders = Arc::new(AtomicUsize::new(0));
    let overlaps = Arc::new(AtomicUsize::new(0));
    let tasks = (0..8).map(|_| {
        let (path, config) = (path.clone(), config.clone());
        let (holders, overlaps) = (holders.clone(), overlaps.clone());
        tokio::spawn(async move {
            let lock = AdvisoryLock::acquire(&path, &config).await?;
            if holders.fetch_add(1, Ordering::SeqCst) > 0 {
                overlaps.fetch_add(1, Ordering::SeqCst);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
            holders.fetch_sub(1, Ordering::SeqCst);
            drop(lock);
            Ok::<_, AppError>(())
        })
    });
    for result in join_all(tasks).await {
        result??;
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_lock_released_on_drop() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("doc.json.lock");

    let lock = AdvisoryLock::acquire(&path, &fast_store_config()).await?;
    assert_eq!(lock.path(), path.as_path());
    assert!(path.exists());
    drop(lock);
    assert!(!path.exists());
    Ok(())
}

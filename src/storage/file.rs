//! File backend: one JSON object mapping keys to string values.
//!
//! DESIGN
//! ======
//! The whole map is cached in memory and rewritten on every `set`/`remove`.
//! Writes go to a temp file in the same directory and are renamed over the
//! target, so a concurrent reader sees either the old file or the new one.
//!
//! TRADE-OFFS
//! ==========
//! Two processes sharing one file each hold their own cache: the last
//! writer wins and the other's keys may be overwritten. Only one process
//! should own a data file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

use super::{KvStore, StorageError};

type Entries = BTreeMap<String, String>;

pub struct FileKv {
    path: PathBuf,
    /// `None` once closed.
    entries: Mutex<Option<Entries>>,
}

impl FileKv {
    /// Open (or lazily create) the data file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub async fn open(path: PathBuf) -> Result<Self, StorageError> {
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => Entries::new(),
            Ok(raw) => serde_json::from_str::<Entries>(&raw)
                .map_err(|e| StorageError::Encode(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(StorageError::io(format!("read {}", path.display()), e)),
        };
        debug!(path = %path.display(), keys = entries.len(), "file kv opened");
        Ok(Self { path, entries: Mutex::new(Some(entries)) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the map, persist it, then commit it to the cache.
    async fn write_with(&self, change: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().await;
        let current = guard.as_ref().ok_or(StorageError::Closed)?;

        let mut next = current.clone();
        change(&mut next);
        let bytes = serde_json::to_vec_pretty(&next).map_err(|e| StorageError::Encode(e.to_string()))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StorageError::io("file write task", std::io::Error::other(e)))??;

        *guard = Some(next);
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| StorageError::io(format!("create {}", dir.display()), e))?;

    let mut tmp =
        NamedTempFile::new_in(dir).map_err(|e| StorageError::io(format!("temp file in {}", dir.display()), e))?;
    tmp.write_all(contents)
        .map_err(|e| StorageError::io("write temp file", e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StorageError::io("sync temp file", e))?;
    tmp.persist(path)
        .map_err(|e| StorageError::io(format!("persist {}", path.display()), e.error))?;
    Ok(())
}

#[async_trait::async_trait]
impl KvStore for FileKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.entries.lock().await;
        let entries = guard.as_ref().ok_or(StorageError::Closed)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_with(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        {
            let guard = self.entries.lock().await;
            let entries = guard.as_ref().ok_or(StorageError::Closed)?;
            if !entries.contains_key(key) {
                return Ok(());
            }
        }
        self.write_with(|entries| {
            entries.remove(key);
        })
        .await
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.entries.lock().await.take();
        debug!(path = %self.path.display(), "file kv closed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

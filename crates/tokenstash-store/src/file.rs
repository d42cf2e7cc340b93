//! Filesystem token store for the durable scope.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use tokenstash_core::error::StoreError;
use tokenstash_core::{Result, StorageScope, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// A single stored value and when it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// On-disk layout of the storage file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageFile {
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

/// Durable store backed by one JSON file.
///
/// Each read-modify-write holds an exclusive lock on a sibling `.lock`
/// file, so separate processes sharing the file do not tear it. The file
/// is created with owner-only permissions on Unix.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. Nothing is touched on
    /// disk until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the storage file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full entry (value and write time) for `key`.
    pub fn entry(&self, key: &str) -> Result<Option<StoredEntry>> {
        Ok(self.read_file()?.entries.remove(key))
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn read_file(&self) -> Result<StorageFile> {
        if !self.path.exists() {
            return Ok(StorageFile::default());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;

        if content.trim().is_empty() {
            return Ok(StorageFile::default());
        }

        let file = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        Ok(file)
    }

    fn write_file(&self, file: &StorageFile) -> Result<()> {
        let json = serde_json::to_string_pretty(file).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let temp = self.temp_path();
        // A leftover temp file would keep its old mode.
        if temp.exists() {
            fs::remove_file(&temp).map_err(|e| StoreError::io(&temp, e))?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Owner-only from creation.
        #[cfg(unix)]
        options.mode(0o600);

        let mut out = options.open(&temp).map_err(|e| StoreError::io(&temp, e))?;
        out.write_all(json.as_bytes())
            .and_then(|()| out.sync_all())
            .map_err(|e| StoreError::io(&temp, e))?;
        drop(out);

        fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Run `update` against the file contents under the exclusive lock,
    /// writing the result back when it reports a change.
    fn modify<F>(&self, update: F) -> Result<()>
    where
        F: FnOnce(&mut StorageFile) -> bool,
    {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let lock_path = self.lock_path();
        let lock_file: File = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| StoreError::io(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| StoreError::io(&lock_path, e))?;

        let result = self.read_file().and_then(|mut file| {
            if update(&mut file) {
                self.write_file(&file)
            } else {
                Ok(())
            }
        });

        if let Err(e) = lock_file.unlock() {
            warn!(error = %e, path = %lock_path.display(), "Failed to release storage lock");
        }

        result
    }
}

#[async_trait]
impl TokenStore for FileStore {
    fn scope(&self) -> StorageScope {
        StorageScope::Durable
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entry(key)?.map(|entry| entry.value))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|file| {
            file.entries.insert(
                key.to_string(),
                StoredEntry {
                    value: value.to_string(),
                    updated_at: Utc::now(),
                },
            );
            true
        })?;

        debug!("Stored value on disk");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        self.modify(|file| file.entries.remove(key).is_some())?;

        debug!("Removed value from disk");
        Ok(())
    }
}

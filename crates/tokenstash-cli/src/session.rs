//! Token store selection and session client setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use directories::ProjectDirs;

use tokenstash_core::{StorageScope, TokenStore};
use tokenstash_http::{AuthClient, SessionClient};
use tokenstash_store::{FileStore, MemoryStore, StoredEntry};

use crate::cli::Settings;

/// Token store for CLI use, chosen by `--scope`.
#[derive(Debug)]
pub enum CliStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl CliStore {
    /// Human-readable location of the stored token.
    pub fn location(&self) -> String {
        match self {
            CliStore::File(store) => store.path().display().to_string(),
            CliStore::Memory(_) => "memory (this process only)".to_string(),
        }
    }

    /// Full stored entry, when the backend records one.
    pub fn entry(&self, key: &str) -> tokenstash_core::Result<Option<StoredEntry>> {
        match self {
            CliStore::File(store) => store.entry(key),
            CliStore::Memory(_) => Ok(None),
        }
    }
}

#[async_trait]
impl TokenStore for CliStore {
    fn scope(&self) -> StorageScope {
        match self {
            CliStore::File(store) => store.scope(),
            CliStore::Memory(store) => store.scope(),
        }
    }

    async fn get(&self, key: &str) -> tokenstash_core::Result<Option<String>> {
        match self {
            CliStore::File(store) => store.get(key).await,
            CliStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> tokenstash_core::Result<()> {
        match self {
            CliStore::File(store) => store.set(key, value).await,
            CliStore::Memory(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> tokenstash_core::Result<()> {
        match self {
            CliStore::File(store) => store.remove(key).await,
            CliStore::Memory(store) => store.remove(key).await,
        }
    }
}

/// A session client together with the store it writes to.
pub struct CliSession {
    pub client: SessionClient,
    pub store: Arc<CliStore>,
}

/// Get the data directory for durable storage.
fn data_dir(settings: &Settings) -> Result<PathBuf> {
    let dir = match &settings.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("", "", "tokenstash")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&dir).context("Failed to create data directory")?;
    Ok(dir)
}

/// Path of the durable storage file for the configured API origin.
pub fn durable_path(dir: &Path, settings: &Settings) -> PathBuf {
    dir.join("storage")
        .join(format!("{}.json", settings.api.origin_slug()))
}

/// Build the store for the configured scope.
pub fn open_store(settings: &Settings) -> Result<CliStore> {
    Ok(match settings.scope {
        StorageScope::Durable => {
            let dir = data_dir(settings)?;
            CliStore::File(FileStore::new(durable_path(&dir, settings)))
        }
        StorageScope::Ephemeral => CliStore::Memory(MemoryStore::new()),
    })
}

/// Build a session client over a fresh store for the configured scope.
pub fn open_session(settings: &Settings) -> Result<CliSession> {
    let store = Arc::new(open_store(settings)?);
    let auth = AuthClient::new(settings.api.clone()).context("Failed to build HTTP client")?;
    let client = SessionClient::new(auth, store.clone()).with_key(settings.key.clone());

    Ok(CliSession { client, store })
}

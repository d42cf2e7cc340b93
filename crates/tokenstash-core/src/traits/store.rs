//! Token storage trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::StorageScope;

/// A host-provided key-value store bound to one storage scope.
///
/// Implementations hold plain strings; the session client decides what
/// goes in them. `remove` on a missing key is not an error.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the lifetime of the values kept in this store.
    fn scope(&self) -> StorageScope;

    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present.
    async fn remove(&self, key: &str) -> Result<()>;
}

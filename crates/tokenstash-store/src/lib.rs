//! tokenstash-store - Token stores for the two storage scopes.
//!
//! [`FileStore`] is the durable scope: a JSON file that outlives the
//! process. [`MemoryStore`] is the ephemeral scope: it is gone when the
//! owning session is dropped.

mod file;
mod memory;

pub use file::{FileStore, StoredEntry};
pub use memory::MemoryStore;

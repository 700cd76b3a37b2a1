//! Key-value persistence for the credential record.
//!
//! Backends expose the minimal contract of a local, string-keyed JSON
//! store: `get`, `set`, `remove`. A write replaces the whole value for a
//! key; partial updates do not exist at this layer.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Asynchronous key-value storage, local to this device.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, SolvidError};
use crate::storage::KvBackend;

/// In-memory backend with operation counters and failure injection.
///
/// Serves ephemeral stores, and lets tests observe how many storage reads
/// an operation performed or force a write to fail.
#[derive(Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, Value>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    removes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served so far.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set` calls served so far.
    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls served so far.
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Make subsequent `set`/`remove` calls fail with a persistence error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of a stored value, bypassing the counters.
    pub fn peek(&self, key: &str) -> Option<Value> {
        self.map.lock().expect("store map poisoned").get(key).cloned()
    }

    /// Overwrite a stored value directly (tamper tests).
    pub fn poke(&self, key: &str, value: Value) {
        self.map
            .lock()
            .expect("store map poisoned")
            .insert(key.to_string(), value);
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.map.lock().expect("store map poisoned").get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SolvidError::Persistence("write failure injected".into()));
        }
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.map
            .lock()
            .expect("store map poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SolvidError::Persistence("write failure injected".into()));
        }
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.map.lock().expect("store map poisoned").remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn counts_operations() {
        let backend = MemoryBackend::new();
        backend.set("k", json!(1)).await.unwrap();
        backend.get("k").await.unwrap();
        backend.get("k").await.unwrap();
        backend.remove("k").await.unwrap();
        assert_eq!(backend.set_count(), 1);
        assert_eq!(backend.get_count(), 2);
        assert_eq!(backend.remove_count(), 1);
    }

    #[tokio::test]
    async fn injected_failures_surface_as_persistence_errors() {
        let backend = MemoryBackend::new();
        backend.set("k", json!(1)).await.unwrap();
        backend.fail_writes(true);
        assert!(backend.set("k", json!(2)).await.is_err());
        assert!(backend.remove("k").await.is_err());
        // Reads still work, and the old value is untouched.
        assert_eq!(backend.get("k").await.unwrap(), Some(json!(1)));
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::error::{Result, SolvidError};
use crate::storage::KvBackend;

/// File-backed store: one JSON object mapping keys to values.
///
/// Every write rewrites the whole file through a temp-file rename, so a
/// reader never observes a partially written record.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, Value>> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| SolvidError::Persistence(format!("corrupt store file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(SolvidError::Persistence(e.to_string())),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| SolvidError::Persistence(e.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(map)
            .map_err(|e| SolvidError::Serialization(e.to_string()))?;

        // Atomic replacement: write a temp file, then rename over the old one
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| SolvidError::Persistence(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| SolvidError::Persistence(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl KvBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn backend(dir: &TempDir) -> FileBackend {
        FileBackend::new(dir.path().join("store.json"))
    }

    #[tokio::test]
    async fn get_on_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(backend(&dir).get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        backend.set("k", json!({ "v": 1 })).await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), Some(json!({ "v": 1 })));
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        backend.set("k", json!("old")).await.unwrap();
        backend.set("k", json!("new")).await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), Some(json!("new")));
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        backend.set("k", json!(1)).await.unwrap();
        backend.remove("k").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), None);
        backend.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn writes_leave_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        backend.set("k", json!(1)).await.unwrap();
        assert!(!dir.path().join("store.json.tmp").exists());
        assert!(dir.path().join("store.json").exists());
    }

    #[tokio::test]
    async fn corrupt_file_reports_persistence_error() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        std::fs::write(backend.path(), b"not json at all").unwrap();
        let err = backend.get("k").await.unwrap_err();
        assert!(matches!(err, SolvidError::Persistence(_)));
    }
}

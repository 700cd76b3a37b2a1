use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Configuration file format (~/.solvid/solvid.toml).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a decrypted key may be served from memory before the store
    /// decrypts again.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results requested per search (the API caps this at 50).
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_results() -> u32 {
    12
}

fn default_true() -> bool {
    true
}

/// Get the solvid data directory (`$SOLVID_DIR`, else ~/.solvid).
pub fn solvid_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SOLVID_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .expect("Could not determine home directory")
        .join(".solvid")
}

/// Get the key-value store file path.
pub fn store_path() -> PathBuf {
    solvid_dir().join("store.json")
}

/// Get the config file path.
pub fn config_path() -> PathBuf {
    solvid_dir().join("solvid.toml")
}

/// Get the operation log path.
pub fn audit_log_path() -> PathBuf {
    solvid_dir().join("audit.log")
}

/// Get the operation-log seed path.
pub fn audit_seed_path() -> PathBuf {
    solvid_dir().join("audit.key")
}

impl Config {
    /// Load config from a path. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::error::SolvidError::Other(format!("Invalid config: {}", e)))?;
        Ok(config)
    }

    /// Save config to a path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::error::SolvidError::Other(format!("Config serialize error: {}", e))
        })?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("solvid.toml")).unwrap();
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.search.max_results, 12);
        assert!(config.audit.enabled);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("solvid.toml");
        fs::write(&path, "[search]\nmax_results = 5\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.cache.ttl_secs, 300);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("solvid.toml");
        let mut config = Config::default();
        config.cache.ttl_secs = 60;
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.cache.ttl_secs, 60);
    }

    #[test]
    #[serial]
    fn solvid_dir_honors_env_override() {
        std::env::set_var("SOLVID_DIR", "/tmp/solvid-test-dir");
        assert_eq!(solvid_dir(), PathBuf::from("/tmp/solvid-test-dir"));
        std::env::remove_var("SOLVID_DIR");
    }

    #[test]
    #[serial]
    fn solvid_dir_defaults_under_home() {
        std::env::remove_var("SOLVID_DIR");
        assert!(solvid_dir().ends_with(".solvid"));
    }
}

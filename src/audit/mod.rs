//! Append-only operation log with a tamper-evident MAC chain.
//!
//! Each entry's MAC covers the previous entry's MAC, keyed by material
//! derived from a random per-installation seed. The credential key cannot
//! anchor the chain because it is regenerated on every save; the seed is
//! independent random material created on first use.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{Result, SolvidError};

type HmacSha256 = Hmac<Sha256>;

const SEED_LEN: usize = 32;

/// A single operation-log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub op: String,
    pub actor: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub mac: String,
}

/// Load the per-installation seed, creating it on first use.
pub fn load_or_create_seed(path: &Path) -> Result<Vec<u8>> {
    if path.exists() {
        let encoded = fs::read_to_string(path)?;
        let seed = BASE64
            .decode(encoded.trim())
            .map_err(|e| SolvidError::Other(format!("corrupt audit seed: {}", e)))?;
        if seed.len() != SEED_LEN {
            return Err(SolvidError::Other("corrupt audit seed".into()));
        }
        return Ok(seed);
    }

    let mut seed = vec![0u8; SEED_LEN];
    OsRng.fill_bytes(&mut seed);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, BASE64.encode(&seed))?;
    Ok(seed)
}

/// Derive the chain key from the seed.
pub fn chain_key(seed: &[u8]) -> Vec<u8> {
    let hk = Hkdf::<Sha256>::new(None, seed);
    let mut okm = vec![0u8; 32];
    hk.expand(b"audit-chain", &mut okm)
        .expect("HKDF output length too large");
    okm
}

/// Append an entry, chaining its MAC to the previous entry's.
pub fn append(
    log_path: &Path,
    op: &str,
    actor: &str,
    outcome: &str,
    note: Option<&str>,
    key: &[u8],
) -> Result<()> {
    let prev = last_mac(log_path);
    let at = Utc::now();
    let mac = entry_mac(&prev, at, op, actor, outcome, note, key);

    let entry = AuditEntry {
        at,
        op: op.to_string(),
        actor: actor.to_string(),
        outcome: outcome.to_string(),
        note: note.map(String::from),
        mac,
    };

    let line =
        serde_json::to_string(&entry).map_err(|e| SolvidError::Serialization(e.to_string()))?;

    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(log_path)?;
    writeln!(file, "{}", line)?;

    Ok(())
}

/// Read every entry in the log.
pub fn read_entries(log_path: &Path) -> Result<Vec<AuditEntry>> {
    if !log_path.exists() {
        return Ok(Vec::new());
    }

    let file = fs::File::open(log_path)?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: AuditEntry = serde_json::from_str(&line)
            .map_err(|e| SolvidError::Serialization(e.to_string()))?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Walk the chain, erroring with the index of the first entry whose MAC
/// does not match. Returns the entry count on success.
pub fn verify_chain(log_path: &Path, key: &[u8]) -> Result<usize> {
    let entries = read_entries(log_path)?;
    let mut prev = String::new();

    for (i, entry) in entries.iter().enumerate() {
        let expected = entry_mac(
            &prev,
            entry.at,
            &entry.op,
            &entry.actor,
            &entry.outcome,
            entry.note.as_deref(),
            key,
        );
        if expected != entry.mac {
            return Err(SolvidError::AuditChainBroken(i));
        }
        prev = entry.mac.clone();
    }

    Ok(entries.len())
}

fn entry_mac(
    prev: &str,
    at: DateTime<Utc>,
    op: &str,
    actor: &str,
    outcome: &str,
    note: Option<&str>,
    key: &[u8],
) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(prev.as_bytes());
    let at = at.to_rfc3339();
    for part in [at.as_str(), op, actor, outcome, note.unwrap_or("")] {
        mac.update(b"|");
        mac.update(part.as_bytes());
    }
    hex::encode(mac.finalize().into_bytes())
}

fn last_mac(log_path: &Path) -> String {
    if !log_path.exists() {
        return String::new();
    }

    if let Ok(content) = fs::read_to_string(log_path) {
        for line in content.lines().rev() {
            if !line.trim().is_empty() {
                if let Ok(entry) = serde_json::from_str::<AuditEntry>(line) {
                    return entry.mac;
                }
            }
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key_for(dir: &TempDir) -> Vec<u8> {
        let seed = load_or_create_seed(&dir.path().join("audit.key")).unwrap();
        chain_key(&seed)
    }

    #[test]
    fn seed_is_stable_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.key");
        let first = load_or_create_seed(&path).unwrap();
        let second = load_or_create_seed(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), SEED_LEN);
    }

    #[test]
    fn append_then_verify() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("audit.log");
        let key = key_for(&dir);

        append(&log, "key.set", "test", "success", None, &key).unwrap();
        append(&log, "search", "test", "success", Some("3 hits"), &key).unwrap();

        assert_eq!(verify_chain(&log, &key).unwrap(), 2);
        let entries = read_entries(&log).unwrap();
        assert_eq!(entries[0].op, "key.set");
        assert_eq!(entries[1].note.as_deref(), Some("3 hits"));
    }

    #[test]
    fn tampered_entry_breaks_the_chain() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("audit.log");
        let key = key_for(&dir);

        append(&log, "key.set", "test", "success", None, &key).unwrap();
        append(&log, "key.remove", "test", "success", None, &key).unwrap();

        let contents = fs::read_to_string(&log).unwrap();
        fs::write(&log, contents.replacen("key.set", "key.get", 1)).unwrap();

        let err = verify_chain(&log, &key).unwrap_err();
        assert!(matches!(err, SolvidError::AuditChainBroken(0)));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("audit.log");
        let key = key_for(&dir);

        append(&log, "key.set", "test", "success", None, &key).unwrap();

        let other = chain_key(b"some other seed material here!!!");
        assert!(verify_chain(&log, &other).is_err());
    }

    #[test]
    fn empty_log_verifies_to_zero_entries() {
        let dir = TempDir::new().unwrap();
        let key = key_for(&dir);
        assert_eq!(verify_chain(&dir.path().join("audit.log"), &key).unwrap(), 0);
    }
}

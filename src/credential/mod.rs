//! Encrypted credential store.
//!
//! One record, one secret: the user's search-API key, encrypted at rest
//! under a key generated fresh on every save and stored alongside the
//! ciphertext it protects. Decrypted values are cached in memory for a
//! short TTL so repeated lookups do not pay for a storage read plus an
//! AEAD pass each time.

pub mod crypto;

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use zeroize::Zeroizing;

use crate::error::{Result, SolvidError};
use crate::storage::KvBackend;

/// Storage key holding the encrypted record.
pub const STORAGE_KEY: &str = "encryptedApiKey";

/// Record format tag, reserved for future migration.
pub const RECORD_VERSION: u32 = 1;

/// Default time a decrypted value may be served from memory.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// The persisted shape: IV, ciphertext, and exported key, all base64.
///
/// A record is either entirely present or entirely absent. A stored value
/// missing any field fails deserialization and is treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedRecord {
    pub iv: String,
    pub data: String,
    pub key: String,
    pub version: u32,
}

/// Single-slot cache for the decrypted secret.
#[derive(Default)]
struct CacheSlot {
    secret: Option<SecretString>,
    cached_at: Option<Instant>,
}

impl CacheSlot {
    /// Return the cached plaintext if it was stored less than `ttl` ago.
    fn get(&self, now: Instant, ttl: Duration) -> Option<String> {
        let secret = self.secret.as_ref()?;
        let cached_at = self.cached_at?;
        if now.duration_since(cached_at) < ttl {
            Some(secret.expose_secret().clone())
        } else {
            None
        }
    }

    fn set(&mut self, value: &str, now: Instant) {
        self.secret = Some(SecretString::new(value.to_string()));
        self.cached_at = Some(now);
    }

    fn clear(&mut self) {
        self.secret = None;
        self.cached_at = None;
    }
}

/// Encrypted credential store over an async key-value backend.
///
/// `save` and `remove` surface persistence failures; `load` and `exists`
/// absorb every failure into "no key configured". Callers that need strict
/// ordering between overlapping calls must await each call before issuing
/// the next; interleaved cache updates resolve to last-write-wins.
pub struct CredentialStore<B: KvBackend> {
    backend: B,
    cache: RwLock<CacheSlot>,
    ttl: Duration,
}

impl<B: KvBackend> CredentialStore<B> {
    /// Create a store with the default 5-minute cache TTL.
    pub fn new(backend: B) -> Self {
        Self::with_ttl(backend, DEFAULT_CACHE_TTL)
    }

    /// Create a store with an explicit cache TTL.
    pub fn with_ttl(backend: B, ttl: Duration) -> Self {
        Self {
            backend,
            cache: RwLock::new(CacheSlot::default()),
            ttl,
        }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Encrypt `secret` under a fresh key and IV and persist the record,
    /// replacing any previous one. The cache is updated only after the
    /// write succeeds.
    pub async fn save(&self, secret: &str) -> Result<()> {
        let key = crypto::generate_key();
        let plaintext = Zeroizing::new(secret.as_bytes().to_vec());
        let (iv, ciphertext) = crypto::encrypt(&key, &plaintext)?;

        let record = EncryptedRecord {
            iv: crypto::to_b64(&iv),
            data: crypto::to_b64(&ciphertext),
            key: crypto::export_key(&key),
            version: RECORD_VERSION,
        };
        let value = serde_json::to_value(&record)
            .map_err(|e| SolvidError::Serialization(e.to_string()))?;

        self.backend.set(STORAGE_KEY, value).await?;

        self.cache.write().await.set(secret, Instant::now());
        Ok(())
    }

    /// Return the secret, or an empty string when no usable record exists.
    ///
    /// Served from the cache while fresh; otherwise read from storage and
    /// decrypted. An absent, malformed, or undecryptable record and a
    /// storage read error all produce an empty string, never an error:
    /// the caller's remedy is the same in every case, asking the user for
    /// the key again.
    pub async fn load(&self) -> String {
        if let Some(cached) = self.cache.read().await.get(Instant::now(), self.ttl) {
            return cached;
        }

        let record = match self.read_record().await {
            Some(record) => record,
            None => return String::new(),
        };

        let secret = match decrypt_record(&record) {
            Ok(secret) => secret,
            Err(_) => return String::new(),
        };

        self.cache.write().await.set(&secret, Instant::now());
        secret
    }

    /// Delete the persisted record and clear the cache.
    ///
    /// The cache is left untouched when the deletion fails, so a caller
    /// retrying `remove` observes consistent state.
    pub async fn remove(&self) -> Result<()> {
        self.backend.remove(STORAGE_KEY).await?;
        self.cache.write().await.clear();
        Ok(())
    }

    /// Whether a complete record is persisted, without decrypting it.
    /// Never reads or writes the cache.
    pub async fn exists(&self) -> bool {
        self.read_record().await.is_some()
    }

    /// Drop any cached plaintext; the next `load` decrypts from storage.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// Read and parse the persisted record; any failure means "absent".
    async fn read_record(&self) -> Option<EncryptedRecord> {
        let value = self.backend.get(STORAGE_KEY).await.ok()??;
        serde_json::from_value(value).ok()
    }
}

/// Import the record's key and decrypt its ciphertext into a string.
fn decrypt_record(record: &EncryptedRecord) -> Result<String> {
    let key = crypto::import_key(&record.key)?;
    let iv = crypto::from_b64(&record.iv)?;
    let ciphertext = crypto::from_b64(&record.data)?;
    let plaintext = crypto::decrypt(&key, &iv, &ciphertext)?;
    String::from_utf8(plaintext.to_vec()).map_err(|e| SolvidError::Decryption(e.to_string()))
}

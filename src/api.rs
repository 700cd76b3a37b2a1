//! High-level programmatic surface.
//!
//! [`SolvidClient`] wires the encrypted credential store, the search
//! client, and the operation log together, handling operate-then-audit in
//! every method. The CLI handlers consume this same facade.

use std::time::Duration;

use crate::audit;
use crate::config::{self, Config};
use crate::credential::CredentialStore;
use crate::error::{Result, SolvidError};
use crate::problem;
use crate::search::{SearchClient, VideoHit};
use crate::storage::FileBackend;

/// High-level client over the credential store and search API.
pub struct SolvidClient {
    store: CredentialStore<FileBackend>,
    search: SearchClient,
    config: Config,
    /// Human-readable actor label for audit entries.
    actor: String,
}

impl SolvidClient {
    /// Build a client from the on-disk configuration (defaults when the
    /// config file is absent).
    pub fn from_config() -> Result<Self> {
        let config = Config::load(&config::config_path())?;
        Ok(Self::with_config(config))
    }

    /// Build a client from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        let backend = FileBackend::new(config::store_path());
        let store =
            CredentialStore::with_ttl(backend, Duration::from_secs(config.cache.ttl_secs));
        let search = SearchClient::with_max_results(config.search.max_results);
        Self {
            store,
            search,
            config,
            actor: "api".to_string(),
        }
    }

    /// Override the actor label used in audit entries.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Borrow the underlying credential store.
    pub fn store(&self) -> &CredentialStore<FileBackend> {
        &self.store
    }

    /// Encrypt and persist the API key.
    pub async fn set_key(&self, secret: &str) -> Result<()> {
        let result = self.store.save(secret).await;
        self.audit("key.set", outcome_of(&result), None);
        result
    }

    /// Whether a complete encrypted record is present, without decrypting.
    pub async fn key_configured(&self) -> bool {
        let present = self.store.exists().await;
        self.audit(
            "key.status",
            if present { "configured" } else { "absent" },
            None,
        );
        present
    }

    /// Delete the stored key.
    pub async fn remove_key(&self) -> Result<()> {
        let result = self.store.remove().await;
        self.audit("key.remove", outcome_of(&result), None);
        result
    }

    /// Drop the in-memory plaintext cache.
    pub async fn clear_cache(&self) {
        self.store.clear_cache().await;
    }

    /// Search for walkthrough videos for `topic` (a problem URL, slug, or
    /// free-form title).
    pub async fn find_videos(&self, topic: &str) -> Result<Vec<VideoHit>> {
        let query = problem::query_for_topic(topic);

        let key = self.store.load().await;
        if key.is_empty() {
            self.audit("search", "no_key", Some(&query));
            return Err(SolvidError::MissingApiKey);
        }

        let result = self.search.search(&query, &key).await;
        match &result {
            Ok(hits) => self.audit("search", "success", Some(&format!("{} hits", hits.len()))),
            Err(_) => self.audit("search", "error", Some(&query)),
        }
        result
    }

    /// Read all operation-log entries.
    pub fn audit_entries(&self) -> Result<Vec<audit::AuditEntry>> {
        audit::read_entries(&config::audit_log_path())
    }

    /// Verify the operation log's MAC chain. Returns the entry count.
    pub fn verify_audit_chain(&self) -> Result<usize> {
        let seed = audit::load_or_create_seed(&config::audit_seed_path())?;
        audit::verify_chain(&config::audit_log_path(), &audit::chain_key(&seed))
    }

    // ── internal helpers ─────────────────────────────────────────

    fn audit(&self, op: &str, outcome: &str, note: Option<&str>) {
        if !self.config.audit.enabled {
            return;
        }
        let _ = audit::load_or_create_seed(&config::audit_seed_path()).and_then(|seed| {
            audit::append(
                &config::audit_log_path(),
                op,
                &self.actor,
                outcome,
                note,
                &audit::chain_key(&seed),
            )
        });
    }
}

fn outcome_of<T>(result: &Result<T>) -> &'static str {
    if result.is_ok() {
        "success"
    } else {
        "error"
    }
}

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolvidError {
    #[error("Storage error: {0}")]
    Persistence(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No API key configured. Run `solvid key set` first.")]
    MissingApiKey,

    #[error("Search API error: HTTP {status}: {body}")]
    SearchApi { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Audit chain integrity violation at entry {0}")]
    AuditChainBroken(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl SolvidError {
    /// Return a typed exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            SolvidError::Persistence(_) => 2,
            SolvidError::Encryption(_) => 2,
            SolvidError::Decryption(_) => 2,
            SolvidError::Serialization(_) => 1,
            SolvidError::MissingApiKey => 3,
            SolvidError::SearchApi { .. } => 4,
            SolvidError::Http(_) => 4,
            SolvidError::AuditChainBroken(_) => 5,
            SolvidError::Io(_) => 1,
            SolvidError::Other(_) => 1,
        }
    }

    /// Return a string error code identifier.
    pub fn error_code(&self) -> &'static str {
        match self {
            SolvidError::Persistence(_) => "persistence_error",
            SolvidError::Encryption(_) => "encryption_error",
            SolvidError::Decryption(_) => "decryption_error",
            SolvidError::Serialization(_) => "serialization_error",
            SolvidError::MissingApiKey => "missing_api_key",
            SolvidError::SearchApi { .. } => "search_api_error",
            SolvidError::Http(_) => "http_error",
            SolvidError::AuditChainBroken(_) => "audit_chain_broken",
            SolvidError::Io(_) => "io_error",
            SolvidError::Other(_) => "error",
        }
    }
}

/// JSON error response for --json mode.
#[derive(Serialize)]
pub struct JsonError {
    pub error: JsonErrorDetail,
}

#[derive(Serialize)]
pub struct JsonErrorDetail {
    pub code: String,
    pub message: String,
    pub exit_code: i32,
}

impl JsonError {
    pub fn from_error(e: &SolvidError) -> Self {
        Self {
            error: JsonErrorDetail {
                code: e.error_code().to_string(),
                message: e.to_string(),
                exit_code: e.exit_code(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, SolvidError>;

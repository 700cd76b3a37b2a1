//! solvid: video walkthroughs for coding problems, with the search-API
//! key kept encrypted at rest.
//!
//! The credential store encrypts the user's API key under a key generated
//! fresh on every save, persists the record in a local JSON key-value
//! file, and caches the decrypted value in memory for a short TTL. The
//! search client spends that key against the YouTube Data API. The CLI is
//! gated behind the `cli` feature and private to the binary.
//!
//! # Quick start
//!
//! ```no_run
//! use solvid::api::SolvidClient;
//!
//! # async fn demo() -> Result<(), solvid::error::SolvidError> {
//! let client = SolvidClient::from_config()?;
//! client.set_key("AIzaSy-your-api-key").await?;
//! let hits = client.find_videos("two-sum").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod audit;
pub mod config;
pub mod credential;
pub mod error;
pub mod problem;
pub mod search;
pub mod storage;

pub mod audit;
pub mod json_output;
pub mod key;
pub mod search;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "solvid",
    version,
    about = "Video walkthroughs for coding problems, straight from the terminal"
)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the encrypted search-API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// Search for walkthrough videos for a problem
    Search {
        /// Problem URL, slug, or free-form title
        #[arg(required = true)]
        topic: Vec<String>,
        /// Print at most this many hits
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Inspect the operation log
    Audit {
        #[command(subcommand)]
        command: AuditCommands,
    },
}

#[derive(Subcommand)]
pub enum KeyCommands {
    /// Store the API key encrypted (reads the key from stdin when piped)
    Set,
    /// Report whether a key is configured, without decrypting it
    Status,
    /// Delete the stored key
    Remove,
}

#[derive(Subcommand)]
pub enum AuditCommands {
    /// Print recent entries
    Show {
        /// Show at most this many entries
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Verify the MAC chain
    Verify,
}

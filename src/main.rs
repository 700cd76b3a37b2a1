mod cli;

use clap::Parser;
use cli::{AuditCommands, Cli, Commands, KeyCommands};
use solvid::error::JsonError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Key { command } => match command {
            KeyCommands::Set => cli::key::set().await,
            KeyCommands::Status => cli::key::status(cli.json).await,
            KeyCommands::Remove => cli::key::remove().await,
        },

        Commands::Search { topic, limit } => cli::search::run(topic, *limit, cli.json).await,

        Commands::Audit { command } => match command {
            AuditCommands::Show { limit } => cli::audit::show(*limit, cli.json).await,
            AuditCommands::Verify => cli::audit::verify(cli.json).await,
        },
    };

    if let Err(e) = result {
        if cli.json {
            let body = JsonError::from_error(&e);
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", e),
            }
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

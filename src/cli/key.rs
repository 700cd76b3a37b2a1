use std::io::{self, IsTerminal, Read};

use solvid::api::SolvidClient;
use solvid::error::{Result, SolvidError};

use super::json_output::KeyStatusResponse;

pub async fn set() -> Result<()> {
    let client = SolvidClient::from_config()?.with_actor("cli");

    let key = if io::stdin().is_terminal() {
        dialoguer::Password::new()
            .with_prompt("API key")
            .interact()
            .map_err(|e| SolvidError::Other(format!("Failed to read key: {}", e)))?
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| SolvidError::Other(format!("Failed to read from stdin: {}", e)))?;
        // Trim trailing newline (common when piping echo)
        buf.trim_end_matches('\n').to_string()
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(SolvidError::Other("Refusing to store an empty key".into()));
    }

    client.set_key(key).await?;
    eprintln!("API key stored (encrypted).");
    Ok(())
}

pub async fn status(json: bool) -> Result<()> {
    let client = SolvidClient::from_config()?.with_actor("cli");
    let configured = client.key_configured().await;

    if json {
        let body = KeyStatusResponse { configured };
        println!(
            "{}",
            serde_json::to_string_pretty(&body)
                .map_err(|e| SolvidError::Serialization(e.to_string()))?
        );
    } else if configured {
        println!("API key: configured");
    } else {
        println!("API key: not configured");
    }
    Ok(())
}

pub async fn remove() -> Result<()> {
    let client = SolvidClient::from_config()?.with_actor("cli");
    client.remove_key().await?;
    eprintln!("API key removed.");
    Ok(())
}

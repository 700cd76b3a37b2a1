use solvid::api::SolvidClient;
use solvid::error::{Result, SolvidError};

use super::json_output::{AuditEntryItem, AuditShowResponse, AuditVerifyResponse};

pub async fn show(limit: usize, json: bool) -> Result<()> {
    let client = SolvidClient::from_config()?;
    let entries = client.audit_entries()?;
    let total = entries.len();
    let tail = &entries[total.saturating_sub(limit)..];

    if json {
        let body = AuditShowResponse {
            entries: tail
                .iter()
                .map(|entry| AuditEntryItem {
                    at: entry.at.to_rfc3339(),
                    op: entry.op.clone(),
                    actor: entry.actor.clone(),
                    outcome: entry.outcome.clone(),
                    note: entry.note.clone(),
                })
                .collect(),
            shown: tail.len(),
            total,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&body)
                .map_err(|e| SolvidError::Serialization(e.to_string()))?
        );
        return Ok(());
    }

    if tail.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in tail {
        println!(
            "{}  {:<12} {:<12} {}",
            entry.at.to_rfc3339(),
            entry.op,
            entry.outcome,
            entry.note.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub async fn verify(json: bool) -> Result<()> {
    let client = SolvidClient::from_config()?;
    let count = client.verify_audit_chain()?;

    if json {
        let body = AuditVerifyResponse {
            entries: count,
            valid: true,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&body)
                .map_err(|e| SolvidError::Serialization(e.to_string()))?
        );
    } else {
        println!("Audit chain OK ({} entries).", count);
    }
    Ok(())
}

use console::style;

use solvid::api::SolvidClient;
use solvid::error::{Result, SolvidError};

use super::json_output::{SearchHitItem, SearchResponse};

pub async fn run(topic: &[String], limit: Option<usize>, json: bool) -> Result<()> {
    let topic = topic.join(" ");
    let client = SolvidClient::from_config()?.with_actor("cli");

    let mut hits = client.find_videos(&topic).await?;
    if let Some(limit) = limit {
        hits.truncate(limit);
    }

    if json {
        let body = SearchResponse {
            query_topic: topic,
            hits: hits
                .iter()
                .map(|hit| SearchHitItem {
                    video_id: hit.video_id.clone(),
                    title: hit.title.clone(),
                    channel: hit.channel.clone(),
                    url: hit.watch_url(),
                })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&body)
                .map_err(|e| SolvidError::Serialization(e.to_string()))?
        );
        return Ok(());
    }

    if hits.is_empty() {
        println!("No walkthroughs found.");
        return Ok(());
    }

    for hit in &hits {
        println!("{}", style(&hit.title).bold());
        println!("  {}  {}", style(&hit.channel).dim(), hit.watch_url());
    }
    Ok(())
}

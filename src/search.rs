//! YouTube Data API v3 search client.
//!
//! Spends the stored API key against the `search` endpoint and maps the
//! response to a flat list of playable hits.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolvidError};

/// Default endpoint for the search API.
pub const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

/// Results requested per search.
pub const DEFAULT_MAX_RESULTS: u32 = 12;

/// One playable search hit.
#[derive(Debug, Clone, Serialize)]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail_url: String,
}

impl VideoHit {
    /// Direct watch URL for this hit.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

// Wire shapes. Everything is optional so one malformed item cannot sink
// the whole response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: Option<ItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    channel_title: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

/// Thin client over the search endpoint.
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
    max_results: u32,
}

impl SearchClient {
    pub fn new() -> Self {
        Self::with_max_results(DEFAULT_MAX_RESULTS)
    }

    /// Client requesting up to `max_results` hits (clamped to the API's
    /// 1..=50 window).
    pub fn with_max_results(max_results: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: SEARCH_ENDPOINT.to_string(),
            max_results: max_results.clamp(1, 50),
        }
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Search for videos matching `query` using the caller's API key.
    pub async fn search(&self, query: &str, api_key: &str) -> Result<Vec<VideoHit>> {
        let max_results = self.max_results.to_string();
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SolvidError::SearchApi { status, body });
        }

        let data: SearchResponse = resp.json().await?;
        Ok(collect_hits(data))
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map wire items to hits, preferring the medium thumbnail and dropping
/// items without a video id.
fn collect_hits(data: SearchResponse) -> Vec<VideoHit> {
    data.items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.and_then(|id| id.video_id)?;
            let (title, channel, thumbnail_url) = match item.snippet {
                Some(snippet) => (
                    snippet.title.unwrap_or_default(),
                    snippet.channel_title.unwrap_or_default(),
                    thumbnail_url(snippet.thumbnails),
                ),
                None => (String::new(), String::new(), String::new()),
            };
            Some(VideoHit {
                video_id,
                title,
                channel,
                thumbnail_url,
            })
        })
        .collect()
}

fn thumbnail_url(thumbnails: Option<Thumbnails>) -> String {
    thumbnails
        .and_then(|t| t.medium.or(t.default))
        .and_then(|t| t.url)
        .unwrap_or_default()
}

use serde::Serialize;

/// JSON response for `solvid key status --json`.
#[derive(Serialize)]
pub struct KeyStatusResponse {
    pub configured: bool,
}

/// JSON response for `solvid search --json`.
#[derive(Serialize)]
pub struct SearchResponse {
    pub query_topic: String,
    pub hits: Vec<SearchHitItem>,
}

#[derive(Serialize)]
pub struct SearchHitItem {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub url: String,
}

/// JSON response for `solvid audit show --json`.
#[derive(Serialize)]
pub struct AuditShowResponse {
    pub entries: Vec<AuditEntryItem>,
    pub shown: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct AuditEntryItem {
    pub at: String,
    pub op: String,
    pub actor: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// JSON response for `solvid audit verify --json`.
#[derive(Serialize)]
pub struct AuditVerifyResponse {
    pub entries: usize,
    pub valid: bool,
}

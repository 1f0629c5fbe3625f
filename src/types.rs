use chrono::{DateTime, Utc};
use serde::Deserialize;

// GitHub API response structures
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepoSummary {
    #[serde(rename = "full_name")]
    pub name: String,
    #[serde(rename = "stargazers_count")]
    pub total_stargazers: u32,
}

/// One entry of the stargazers endpoint when requested with the
/// `star+json` media type.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct StarEvent {
    #[serde(rename = "starred_at")]
    pub occurred_at: DateTime<Utc>,
}

impl StarEvent {
    pub fn new(occurred_at: DateTime<Utc>) -> Self {
        Self { occurred_at }
    }
}

//! Remote pun feed.
//!
//! The feed is a JSON array of objects, each carrying the pun text in a
//! configurable string field (`[{"Pun": "..."}, ...]`).

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::config::FeedConfig;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed feed: {0}")]
    Malformed(String),
}

pub struct JokeFeed {
    config: FeedConfig,
    client: Client,
}

impl JokeFeed {
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Download the feed and return the jokes in feed order.
    pub async fn fetch(&self) -> Result<Vec<String>, FeedError> {
        info!("Fetching jokes from {}", self.config.url);

        let resp = self.client.get(&self.config.url).send().await?;
        if !resp.status().is_success() {
            return Err(FeedError::Status(resp.status()));
        }
        let body = resp.text().await?;

        let jokes = parse_feed(&body, &self.config.text_field)?;
        info!("Fetched {} jokes", jokes.len());
        Ok(jokes)
    }
}

/// Extract `field` from every entry of a JSON array document.
pub fn parse_feed(body: &str, field: &str) -> Result<Vec<String>, FeedError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| FeedError::Malformed(e.to_string()))?;

    let entries = document
        .as_array()
        .ok_or_else(|| FeedError::Malformed("expected a JSON array".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry[field]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| {
                    FeedError::Malformed(format!("entry {i} has no string field '{field}'"))
                })
        })
        .collect()
}

// World clock API client.
//
// A single unauthenticated GET returning a JSON object; only the
// `currentDateTime` field is used.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::traits::DateTimeSource;

/// Default endpoint for the current UTC time.
pub const DEFAULT_WORLDCLOCK_URL: &str = "http://worldclockapi.com/api/json/utc/now";

/// HTTP client for the world clock API.
pub struct WorldClockClient {
    client: reqwest::Client,
    url: String,
}

impl WorldClockClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("homework/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl DateTimeSource for WorldClockClient {
    async fn current_datetime(&self) -> Result<String> {
        debug!(url = %self.url, "Fetching current time");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("World clock request failed: {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("World clock returned {status}: {body}");
        }

        let payload: WorldClockResponse = response
            .json()
            .await
            .context("Failed to parse world clock response")?;

        Ok(payload.current_date_time)
    }
}

/// The fields we read from the world clock payload.
#[derive(Debug, Deserialize)]
pub struct WorldClockResponse {
    #[serde(rename = "currentDateTime")]
    pub current_date_time: String,
}

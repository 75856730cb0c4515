use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    parser::RawFeed,
};

/// Source of raw NEO records for a closed date window.
#[async_trait::async_trait]
pub trait FeedAdapter: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_window(&self, start: NaiveDate, end: NaiveDate) -> Result<RawFeed>;
}

/// NASA NeoWs `feed` endpoint.
pub struct NeoWsAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NeoWsAdapter {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::UpstreamFailure(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Self::new(
            &cfg.feed_base_url,
            &cfg.nasa_api_key,
            Duration::from_secs(cfg.feed_timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl FeedAdapter for NeoWsAdapter {
    fn name(&self) -> &'static str {
        "neows"
    }

    async fn fetch_window(&self, start: NaiveDate, end: NaiveDate) -> Result<RawFeed> {
        let url = format!("{}/feed", self.base_url);
        let start_date = start.format("%Y-%m-%d").to_string();
        let end_date = end.format("%Y-%m-%d").to_string();
        debug!(%url, %start_date, %end_date, "requesting feed window");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;

        let body = response.text().await.map_err(upstream)?;
        let feed = RawFeed::from_json(&body)?;
        info!(element_count = feed.element_count, "feed window received");
        Ok(feed)
    }
}

// reqwest errors carry the request url, which includes the api key.
fn upstream(e: reqwest::Error) -> AppError {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = e.status() {
        format!("feed returned {status}")
    } else {
        e.without_url().to_string()
    };
    AppError::UpstreamFailure(reason)
}

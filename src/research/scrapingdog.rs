//! ScrapingDog page scraping
//!
//! Dynamic rendering is always disabled.

use super::{PageScraper, ScrapeResponse};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const SCRAPINGDOG_URL: &str = "https://api.scrapingdog.com/scrape";

#[derive(Clone)]
pub struct ScrapingDogClient {
    client: Client,
    api_key: String,
}

impl ScrapingDogClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl PageScraper for ScrapingDogClient {
    async fn scrape(&self, url: &str) -> Result<ScrapeResponse> {
        debug!(url, "Scraping website");

        let response = self
            .client
            .get(SCRAPINGDOG_URL)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("url", url),
                ("dynamic", "false"),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ScrapeResponse { status, body })
    }
}

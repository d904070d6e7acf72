//! Wikipedia lookups through the MediaWiki Action API
//!
//! Titles are matched exactly; redirects are not followed.

use super::{Encyclopedia, EncyclopediaPage};
use crate::error::AgentError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(language: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .pool_idle_timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_url: format!("https://{}.wikipedia.org/w/api.php", language),
        })
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn lookup(&self, title: &str) -> Result<Option<EncyclopediaPage>> {
        debug!(title, "Querying Wikipedia");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
                ("prop", "extracts|info|categories"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("cllimit", "max"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::SourceError(format!(
                "Wikipedia API returned {}",
                status
            )));
        }

        let body: QueryResponse = response.json().await?;
        Ok(into_page(body))
    }
}

fn into_page(body: QueryResponse) -> Option<EncyclopediaPage> {
    let page = body.query?.pages.into_iter().next()?;
    if page.missing || page.invalid {
        return None;
    }

    Some(EncyclopediaPage {
        url: page.fullurl.unwrap_or_default(),
        summary: page.extract.unwrap_or_default().trim().to_string(),
        categories: page.categories.into_iter().map(|c| c.title).collect(),
        title: page.title,
    })
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<Query>,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    fullurl: Option<String>,
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct Category {
    title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_page() {
        let body: QueryResponse = serde_json::from_str(
            r#"{"batchcomplete": true, "query": {"pages": [{
                "pageid": 5533631,
                "ns": 0,
                "title": "Tesla, Inc.",
                "extract": "Tesla, Inc. is an American multinational automotive company.\n",
                "fullurl": "https://en.wikipedia.org/wiki/Tesla,_Inc.",
                "categories": [
                    {"ns": 14, "title": "Category:Electric vehicle manufacturers"},
                    {"ns": 14, "title": "Category:Companies listed on the Nasdaq"}
                ]
            }]}}"#,
        )
        .unwrap();

        let page = into_page(body).unwrap();
        assert_eq!(page.title, "Tesla, Inc.");
        assert_eq!(
            page.summary,
            "Tesla, Inc. is an American multinational automotive company."
        );
        assert_eq!(page.url, "https://en.wikipedia.org/wiki/Tesla,_Inc.");
        assert_eq!(page.categories[0], "Category:Electric vehicle manufacturers");
    }

    #[test]
    fn test_missing_page() {
        let body: QueryResponse = serde_json::from_str(
            r#"{"batchcomplete": true, "query": {"pages": [
                {"ns": 0, "title": "NoSuchCompanyXYZ123", "missing": true}
            ]}}"#,
        )
        .unwrap();

        assert!(into_page(body).is_none());
    }

    #[test]
    fn test_invalid_title() {
        let body: QueryResponse = serde_json::from_str(
            r#"{"query": {"pages": [{"title": "", "invalidreason": "empty", "invalid": true}]}}"#,
        )
        .unwrap();

        assert!(into_page(body).is_none());
    }
}

//! Company research
//!
//! The collector queries Wikipedia and, when a website is known, ScrapingDog.
//! Each outcome is normalized into a [`SourceResult`]; source failures never
//! escape as errors.

use crate::config::{AgentConfig, SCRAPE_TIMEOUT};
use crate::models::{ResearchBundle, SourceKind, SourcePayload, SourceResult};
use crate::text::{take_chars, truncate_with_marker};
use crate::Result;
use async_trait::async_trait;
use tracing::{info, warn};

pub mod scrapingdog;
pub mod wikipedia;

pub use scrapingdog::ScrapingDogClient;
pub use wikipedia::WikipediaClient;

pub const SUMMARY_MAX_CHARS: usize = 500;
pub const MAX_CATEGORIES: usize = 5;
pub const SCRAPE_CONTENT_MAX_CHARS: usize = 1000;
const SCRAPE_ERROR_BODY_CHARS: usize = 200;

/// A page as returned by the encyclopedia, before truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct EncyclopediaPage {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub categories: Vec<String>,
}

/// Raw scrape response.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeResponse {
    pub status: u16,
    pub body: String,
}

/// Exact-title page lookup. `Ok(None)` means the page does not exist.
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<Option<EncyclopediaPage>>;
}

/// Fetches a web page through a scraping service.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapeResponse>;
}

pub struct ResearchCollector {
    encyclopedia: Box<dyn Encyclopedia>,
    /// `None` when no scraping API key is configured.
    scraper: Option<Box<dyn PageScraper>>,
}

impl ResearchCollector {
    pub fn new(
        encyclopedia: Box<dyn Encyclopedia>,
        scraper: Option<Box<dyn PageScraper>>,
    ) -> Self {
        Self {
            encyclopedia,
            scraper,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let encyclopedia = WikipediaClient::new(&config.wikipedia_language, &config.user_agent)?;

        let scraper = match &config.scrapingdog_api_key {
            Some(key) => Some(Box::new(ScrapingDogClient::new(key.clone(), SCRAPE_TIMEOUT)?)
                as Box<dyn PageScraper>),
            None => None,
        };

        Ok(Self::new(Box::new(encyclopedia), scraper))
    }

    /// Gather everything available about a company.
    ///
    /// Sources run one after another; a failure in one never stops the next.
    pub async fn collect(&self, company_name: &str, website_url: Option<&str>) -> ResearchBundle {
        let mut bundle = ResearchBundle::new(company_name);

        bundle.sources.push(self.search_encyclopedia(company_name).await);

        if let Some(url) = website_url {
            bundle.sources.push(self.scrape_website(url).await);
        }

        info!(
            company = company_name,
            sources = bundle.sources.len(),
            successful = bundle.success_count(),
            "Research collected"
        );

        bundle
    }

    pub async fn search_encyclopedia(&self, company_name: &str) -> SourceResult {
        match self.encyclopedia.lookup(company_name).await {
            Ok(Some(page)) => SourceResult::success(
                SourceKind::Wikipedia,
                SourcePayload::Encyclopedia {
                    title: page.title,
                    summary: truncate_with_marker(&page.summary, SUMMARY_MAX_CHARS),
                    url: page.url,
                    categories: page.categories.into_iter().take(MAX_CATEGORIES).collect(),
                },
            ),
            Ok(None) => {
                info!(company = company_name, "No Wikipedia page");
                SourceResult::failure(
                    SourceKind::Wikipedia,
                    format!("No Wikipedia page found for {}", company_name),
                )
            }
            Err(e) => {
                warn!(company = company_name, "Wikipedia lookup failed: {}", e);
                SourceResult::failure(SourceKind::Wikipedia, format!("Wikipedia error: {}", e))
            }
        }
    }

    pub async fn scrape_website(&self, url: &str) -> SourceResult {
        let Some(scraper) = &self.scraper else {
            return SourceResult::failure(
                SourceKind::ScrapingDog,
                "ScrapingDog API key not configured",
            );
        };

        match scraper.scrape(url).await {
            Ok(response) if response.status == 200 => SourceResult::success(
                SourceKind::ScrapingDog,
                SourcePayload::Scrape {
                    url: url.to_string(),
                    content: take_chars(&response.body, SCRAPE_CONTENT_MAX_CHARS).to_string(),
                    status_code: response.status,
                },
            ),
            Ok(response) => {
                warn!(url, status = response.status, "Scrape returned non-200");
                SourceResult::failure(
                    SourceKind::ScrapingDog,
                    format!(
                        "HTTP {}: {}",
                        response.status,
                        take_chars(&response.body, SCRAPE_ERROR_BODY_CHARS)
                    ),
                )
            }
            Err(e) => {
                warn!(url, "Scrape failed: {}", e);
                SourceResult::failure(SourceKind::ScrapingDog, format!("Scraping error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeEncyclopedia {
        page: Option<EncyclopediaPage>,
        fail: bool,
    }

    #[async_trait]
    impl Encyclopedia for FakeEncyclopedia {
        async fn lookup(&self, _title: &str) -> Result<Option<EncyclopediaPage>> {
            if self.fail {
                return Err(AgentError::SourceError("connection reset".to_string()));
            }
            Ok(self.page.clone())
        }
    }

    struct FakeScraper {
        response: Option<ScrapeResponse>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageScraper for FakeScraper {
        async fn scrape(&self, _url: &str) -> Result<ScrapeResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .ok_or_else(|| AgentError::SourceError("operation timed out".to_string()))
        }
    }

    fn page(summary: &str, categories: usize) -> EncyclopediaPage {
        EncyclopediaPage {
            title: "Tesla, Inc.".to_string(),
            summary: summary.to_string(),
            url: "https://en.wikipedia.org/wiki/Tesla,_Inc.".to_string(),
            categories: (0..categories).map(|i| format!("Category:{}", i)).collect(),
        }
    }

    fn collector(
        page: Option<EncyclopediaPage>,
        scraper: Option<FakeScraper>,
    ) -> ResearchCollector {
        ResearchCollector::new(
            Box::new(FakeEncyclopedia { page, fail: false }),
            scraper.map(|s| Box::new(s) as Box<dyn PageScraper>),
        )
    }

    #[tokio::test]
    async fn test_missing_page_mentions_company() {
        let collector = collector(None, None);
        let bundle = collector.collect("NoSuchCompanyXYZ123", None).await;

        assert_eq!(bundle.company_name, "NoSuchCompanyXYZ123");
        assert_eq!(bundle.sources.len(), 1);
        let wiki = &bundle.sources[0];
        assert_eq!(wiki.source, SourceKind::Wikipedia);
        assert!(!wiki.is_success());
        assert!(wiki.error().unwrap().contains("NoSuchCompanyXYZ123"));
    }

    #[tokio::test]
    async fn test_summary_truncated_and_categories_capped() {
        let long = "a".repeat(800);
        let collector = collector(Some(page(&long, 9)), None);
        let result = collector.search_encyclopedia("Tesla").await;

        match result.payload() {
            Some(SourcePayload::Encyclopedia {
                summary,
                categories,
                ..
            }) => {
                assert_eq!(summary.len(), SUMMARY_MAX_CHARS + 3);
                assert!(summary.ends_with("..."));
                assert_eq!(categories.len(), MAX_CATEGORIES);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_summary_untouched() {
        let collector = collector(Some(page("Electric cars.", 2)), None);
        let result = collector.search_encyclopedia("Tesla").await;

        match result.payload() {
            Some(SourcePayload::Encyclopedia { summary, categories, .. }) => {
                assert_eq!(summary, "Electric cars.");
                assert_eq!(categories.len(), 2);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_error_is_captured() {
        let collector = ResearchCollector::new(
            Box::new(FakeEncyclopedia {
                page: None,
                fail: true,
            }),
            None,
        );
        let result = collector.search_encyclopedia("Tesla").await;

        assert!(!result.is_success());
        assert_eq!(
            result.error(),
            Some("Wikipedia error: Research source error: connection reset")
        );
    }

    #[tokio::test]
    async fn test_unconfigured_scraper_is_independent() {
        let collector = collector(Some(page("Electric cars.", 1)), None);
        let bundle = collector
            .collect("Tesla", Some("https://www.tesla.com"))
            .await;

        assert_eq!(bundle.sources.len(), 2);
        assert!(bundle.sources[0].is_success());

        let scrape = &bundle.sources[1];
        assert_eq!(scrape.source, SourceKind::ScrapingDog);
        assert!(!scrape.is_success());
        assert!(scrape.error().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_scrape_success_truncates_body() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scraper = FakeScraper {
            response: Some(ScrapeResponse {
                status: 200,
                body: "<html>".repeat(400),
            }),
            calls: calls.clone(),
        };
        let collector = collector(None, Some(scraper));
        let bundle = collector
            .collect("Tesla", Some("https://www.tesla.com"))
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!bundle.sources[0].is_success());
        match bundle.sources[1].payload() {
            Some(SourcePayload::Scrape {
                url,
                content,
                status_code,
            }) => {
                assert_eq!(url, "https://www.tesla.com");
                assert_eq!(content.chars().count(), SCRAPE_CONTENT_MAX_CHARS);
                assert_eq!(*status_code, 200);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scrape_non_200_and_transport_failure() {
        let collector = collector(
            None,
            Some(FakeScraper {
                response: Some(ScrapeResponse {
                    status: 403,
                    body: "Forbidden".to_string(),
                }),
                calls: Arc::new(AtomicUsize::new(0)),
            }),
        );
        let result = collector.scrape_website("https://example.com").await;
        assert_eq!(result.error(), Some("HTTP 403: Forbidden"));

        let collector = self::collector(
            None,
            Some(FakeScraper {
                response: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }),
        );
        let result = collector.scrape_website("https://example.com").await;
        assert!(result.error().unwrap().starts_with("Scraping error:"));
        assert!(result.error().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_no_url_skips_scraper() {
        let calls = Arc::new(AtomicUsize::new(0));
        let collector = collector(
            None,
            Some(FakeScraper {
                response: None,
                calls: calls.clone(),
            }),
        );
        let bundle = collector.collect("Tesla", None).await;

        assert_eq!(bundle.sources.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

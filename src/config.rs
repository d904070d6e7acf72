//! Runtime configuration
//!
//! Values come from the process environment, which the binary seeds from a
//! `.env` file via `dotenv` before calling [`AgentConfig::from_env`].

use crate::error::AgentError;
use crate::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_WIKIPEDIA_LANGUAGE: &str = "en";
pub const DEFAULT_PLANS_DIR: &str = "data/account_plans";
pub const DEFAULT_USER_AGENT: &str = "CompanyResearchAgent/1.0 (account planning assistant)";

/// Scrape requests are the only outbound calls with a deadline.
pub const SCRAPE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub scrapingdog_api_key: Option<String>,
    pub wikipedia_language: String,
    pub user_agent: String,
    pub plans_dir: PathBuf,
}

impl AgentConfig {
    /// Build a config with defaults for everything except the Gemini key.
    pub fn new(gemini_api_key: impl Into<String>) -> Self {
        Self {
            gemini_api_key: gemini_api_key.into(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            scrapingdog_api_key: None,
            wikipedia_language: DEFAULT_WIKIPEDIA_LANGUAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            plans_dir: PathBuf::from(DEFAULT_PLANS_DIR),
        }
    }

    pub fn from_env() -> Result<Self> {
        let gemini_api_key = non_empty_var("GEMINI_API_KEY").ok_or_else(|| {
            AgentError::ConfigError("GEMINI_API_KEY is not set".to_string())
        })?;

        let mut config = Self::new(gemini_api_key);

        if let Some(model) = non_empty_var("GEMINI_MODEL") {
            config.gemini_model = model;
        }
        config.scrapingdog_api_key = non_empty_var("SCRAPINGDOG_API_KEY");
        if let Some(language) = non_empty_var("WIKIPEDIA_LANGUAGE") {
            config.wikipedia_language = language;
        }
        if let Some(dir) = non_empty_var("ACCOUNT_PLAN_DIR") {
            config.plans_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::new("key");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.wikipedia_language, "en");
        assert_eq!(config.plans_dir, PathBuf::from("data/account_plans"));
        assert!(config.scrapingdog_api_key.is_none());
    }
}

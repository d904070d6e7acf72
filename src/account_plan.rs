//! Account plan document
//!
//! A fixed-schema record of eight sections for one company. Sections are
//! keyed by [`Section`], so the set of writable slots is closed at compile
//! time. String identifiers must match a [`Section::key`] exactly.

use crate::error::AgentError;
use crate::Result;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const BANNER_WIDTH: usize = 60;

/// Upper bound on `_N` suffixes tried when a file name is already taken.
const MAX_SAVE_ATTEMPTS: u32 = 100;

//
// ================= Section =================
//

/// The eight account plan sections, declared in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    ExecutiveSummary,
    CompanyOverview,
    MarketPosition,
    KeyStakeholders,
    BusinessChallenges,
    ValueProposition,
    EngagementStrategy,
    SuccessMetrics,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::ExecutiveSummary,
        Section::CompanyOverview,
        Section::MarketPosition,
        Section::KeyStakeholders,
        Section::BusinessChallenges,
        Section::ValueProposition,
        Section::EngagementStrategy,
        Section::SuccessMetrics,
    ];

    /// Stable identifier used in prompts and persisted files.
    pub fn key(self) -> &'static str {
        match self {
            Section::ExecutiveSummary => "executive_summary",
            Section::CompanyOverview => "company_overview",
            Section::MarketPosition => "market_position",
            Section::KeyStakeholders => "key_stakeholders",
            Section::BusinessChallenges => "business_challenges",
            Section::ValueProposition => "value_proposition",
            Section::EngagementStrategy => "engagement_strategy",
            Section::SuccessMetrics => "success_metrics",
        }
    }

    /// Heading shown when the plan is rendered.
    pub fn display_name(self) -> &'static str {
        match self {
            Section::BusinessChallenges => "Business Challenges & Opportunities",
            Section::ValueProposition => "Our Value Proposition",
            other => other.label(),
        }
    }

    /// Plain title-cased form of the key ("key_stakeholders" -> "Key Stakeholders").
    pub fn label(self) -> &'static str {
        match self {
            Section::ExecutiveSummary => "Executive Summary",
            Section::CompanyOverview => "Company Overview",
            Section::MarketPosition => "Market Position",
            Section::KeyStakeholders => "Key Stakeholders",
            Section::BusinessChallenges => "Business Challenges",
            Section::ValueProposition => "Value Proposition",
            Section::EngagementStrategy => "Engagement Strategy",
            Section::SuccessMetrics => "Success Metrics",
        }
    }

    /// Exact lookup by stable key. Anything else, including other spellings
    /// of a key, is `None`.
    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|section| section.key() == key)
    }

    /// Comma separated list of every key, for prompts.
    pub fn key_list() -> String {
        Self::ALL
            .iter()
            .map(|s| s.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

//
// ================= Account Plan =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountPlan {
    company_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    sections: BTreeMap<Section, String>,
}

impl AccountPlan {
    pub fn new(company_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            company_name: company_name.into(),
            created_at: now,
            updated_at: now,
            sections: Section::ALL
                .into_iter()
                .map(|section| (section, String::new()))
                .collect(),
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrite a section by its string identifier.
    ///
    /// Returns `false` without touching the plan if `section_id` is not one
    /// of the eight known sections.
    pub fn update_section(&mut self, section_id: &str, content: impl Into<String>) -> bool {
        match Section::from_key(section_id) {
            Some(section) => {
                self.set(section, content);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, section: Section, content: impl Into<String>) {
        self.sections.insert(section, content.into());
        self.updated_at = Utc::now();
    }

    /// Current text of a section, or `None` for an unknown identifier.
    pub fn get_section(&self, section_id: &str) -> Option<&str> {
        let section = Section::from_key(section_id)?;
        Some(self.get(section))
    }

    pub fn get(&self, section: Section) -> &str {
        self.sections.get(&section).map(String::as_str).unwrap_or_default()
    }

    /// Sections in canonical order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &str)> {
        self.sections.iter().map(|(s, text)| (*s, text.as_str()))
    }

    /// Structured form used for persistence.
    pub fn to_record(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Human readable form. Empty sections are left out.
    pub fn render(&self) -> String {
        let banner = "=".repeat(BANNER_WIDTH);
        let mut out = String::new();

        out.push_str(&format!("\n{}\n", banner));
        out.push_str(&format!("ACCOUNT PLAN: {}\n", self.company_name));
        out.push_str(&format!("{}\n\n", banner));

        for (section, content) in self.sections() {
            if content.is_empty() {
                continue;
            }
            out.push_str(&format!("## {}\n", section.display_name()));
            out.push_str(content);
            out.push_str("\n\n");
        }

        out.push_str(&format!("{}\n", banner));
        out
    }

    /// Write the plan as pretty JSON into `directory` and return the path.
    ///
    /// Every call creates a new file; earlier saves are never overwritten.
    pub fn save(&self, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;

        let stem = format!(
            "{}_{}",
            file_safe_name(&self.company_name),
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let json = serde_json::to_string_pretty(self)?;

        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let file_name = if attempt == 1 {
                format!("{}.json", stem)
            } else {
                format!("{}_{}.json", stem, attempt)
            };
            let path = directory.join(file_name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())?;
                    info!(
                        company = %self.company_name,
                        path = %path.display(),
                        "Account plan saved"
                    );
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(AgentError::PersistenceError(format!(
            "no free file name for {} in {}",
            stem,
            directory.display()
        )))
    }
}

fn file_safe_name(company_name: &str) -> String {
    company_name.replace([' ', '/', '\\'], "_")
}

//! Core data models for company research

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Sources =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Wikipedia,
    ScrapingDog,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceKind::Wikipedia => "Wikipedia",
            SourceKind::ScrapingDog => "ScrapingDog",
        };
        write!(f, "{}", s)
    }
}

/// What a source returned when it succeeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourcePayload {
    Encyclopedia {
        title: String,
        summary: String,
        url: String,
        categories: Vec<String>,
    },
    Scrape {
        url: String,
        content: String,
        status_code: u16,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SourceOutcome {
    Success(SourcePayload),
    Failure { error: String },
}

/// Normalized outcome of one source lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceResult {
    pub source: SourceKind,
    pub outcome: SourceOutcome,
}

impl SourceResult {
    pub fn success(source: SourceKind, payload: SourcePayload) -> Self {
        Self {
            source,
            outcome: SourceOutcome::Success(payload),
        }
    }

    pub fn failure(source: SourceKind, error: impl Into<String>) -> Self {
        Self {
            source,
            outcome: SourceOutcome::Failure {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Success(_))
    }

    pub fn payload(&self) -> Option<&SourcePayload> {
        match &self.outcome {
            SourceOutcome::Success(payload) => Some(payload),
            SourceOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            SourceOutcome::Success(_) => None,
            SourceOutcome::Failure { error } => Some(error),
        }
    }
}

//
// ================= Bundle =================
//

/// Everything gathered for one company in one research cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchBundle {
    pub company_name: String,
    pub sources: Vec<SourceResult>,
}

impl ResearchBundle {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            sources: Vec::new(),
        }
    }

    pub fn successful(&self) -> impl Iterator<Item = &SourceResult> {
        self.sources.iter().filter(|s| s.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SourceResult> {
        self.sources.iter().filter(|s| !s.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.successful().count()
    }
}

//
// ================= Transcript =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
        };
        write!(f, "{}", s)
    }
}

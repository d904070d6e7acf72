//! Company Research Assistant
//!
//! A conversational agent that:
//! - Researches a company from Wikipedia and, optionally, its scraped website
//! - Asks Gemini to turn the research into an eight-section account plan
//! - Saves every generated plan as a JSON file
//! - Rewrites individual sections on request
//!
//! TURN LOOP:
//! MESSAGE → CLASSIFY INTENT → HANDLER → REPLY

pub mod account_plan;
pub mod agent;
pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod memory;
pub mod models;
pub mod prompts;
pub mod research;
pub mod text;

pub use error::Result;

// Re-export common types
pub use account_plan::{AccountPlan, Section};
pub use agent::CompanyResearchAgent;
pub use classifier::{Intent, IntentClassifier};
pub use config::AgentConfig;
pub use models::*;

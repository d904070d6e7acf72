//! Language model collaborator
//!
//! Handlers only see the [`LanguageModel`] trait: a plain-text prompt goes
//! in, plain text comes out. Any structure in the reply is parsed by the
//! caller.

use crate::Result;
use async_trait::async_trait;

pub mod gemini;
pub use gemini::GeminiClient;

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

//! Conversational research agent
//!
//! Owns the session (current company, research bundle, account plan and
//! transcript) and routes each user message to a handler:
//!
//! MESSAGE → CLASSIFY → RESEARCH | GENERATE PLAN | UPDATE SECTION | SHOW PLAN | CHAT

use crate::account_plan::{AccountPlan, Section};
use crate::classifier::{Intent, IntentClassifier};
use crate::config::AgentConfig;
use crate::llm::{GeminiClient, LanguageModel};
use crate::memory::ConversationHistory;
use crate::models::{ResearchBundle, SourcePayload};
use crate::prompts;
use crate::research::ResearchCollector;
use crate::text::take_chars;
use crate::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub mod extract;

pub use extract::{parse_company_name, parse_section_update, parse_website_url, SectionUpdate};

/// Transcript entries included in general conversation prompts.
const CHAT_HISTORY_WINDOW: usize = 6;
const CHAT_HISTORY_MESSAGE_CHARS: usize = 200;

/// Characters of the Wikipedia summary echoed back after research.
const RESEARCH_EXCERPT_CHARS: usize = 200;

/// Below this many successful sources the agent suggests more research
/// before planning. Advisory only.
const RECOMMENDED_SOURCES: usize = 2;

pub struct CompanyResearchAgent {
    model: Box<dyn LanguageModel>,
    collector: ResearchCollector,
    plans_dir: PathBuf,

    current_company: Option<String>,
    research: Option<ResearchBundle>,
    account_plan: Option<AccountPlan>,
    history: ConversationHistory,
}

impl CompanyResearchAgent {
    pub fn new(
        model: Box<dyn LanguageModel>,
        collector: ResearchCollector,
        plans_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model,
            collector,
            plans_dir: plans_dir.into(),
            current_company: None,
            research: None,
            account_plan: None,
            history: ConversationHistory::new(),
        }
    }

    /// Wire up Gemini, Wikipedia and (if keyed) ScrapingDog from config.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let model = GeminiClient::new(config.gemini_api_key.clone(), &config.gemini_model)?;
        let collector = ResearchCollector::from_config(config)?;

        info!(
            model = %config.gemini_model,
            scraping = config.scrapingdog_api_key.is_some(),
            plans_dir = %config.plans_dir.display(),
            "Agent initialized"
        );

        Ok(Self::new(Box::new(model), collector, config.plans_dir.clone()))
    }

    pub fn current_company(&self) -> Option<&str> {
        self.current_company.as_deref()
    }

    pub fn research(&self) -> Option<&ResearchBundle> {
        self.research.as_ref()
    }

    pub fn account_plan(&self) -> Option<&AccountPlan> {
        self.account_plan.as_ref()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Handle one conversational turn and return the reply text.
    ///
    /// The user message is recorded before dispatch and the reply after it.
    /// Errors escape only from model calls outside plan generation and from
    /// saving the plan.
    pub async fn process_message(&mut self, message: &str) -> Result<String> {
        self.history.push_user(message);

        let intent = IntentClassifier::classify(message);
        info!(?intent, "Processing message");

        let response = match intent {
            Intent::Research => self.handle_research(message).await?,
            Intent::GeneratePlan => self.handle_plan_generation().await?,
            Intent::UpdateSection => self.handle_section_update(message).await?,
            Intent::ShowPlan => self.show_current_plan(),
            Intent::General => self.handle_general_conversation(message).await?,
        };

        self.history.push_assistant(response.clone());
        Ok(response)
    }

    // =============================
    // Research
    // =============================

    async fn handle_research(&mut self, message: &str) -> Result<String> {
        let extraction = self
            .model
            .generate(&prompts::company_extraction(message))
            .await?;

        let Some(company_name) = parse_company_name(&extraction) else {
            debug!("No company name in research request");
            return Ok(
                "I'd be happy to research a company for you! Which company would you like me to look into?"
                    .to_string(),
            );
        };

        info!(company = %company_name, "Starting research");
        self.current_company = Some(company_name.clone());
        let mut response = format!("🔍 Starting research on **{}**...\n\n", company_name);

        let url_reply = self
            .model
            .generate(&prompts::website_lookup(&company_name))
            .await?;
        let website_url = parse_website_url(&url_reply);

        match &website_url {
            Some(url) => response.push_str(&format!("📍 Found website: {}\n", url)),
            None => response.push_str("ℹ️ No official website URL found.\n"),
        }

        response.push_str("\n🔎 Gathering information from multiple sources...\n");

        let bundle = self
            .collector
            .collect(&company_name, website_url.as_deref())
            .await;

        response.push_str(&research_summary(&bundle));
        self.research = Some(bundle);

        Ok(response)
    }

    // =============================
    // Plan generation
    // =============================

    async fn handle_plan_generation(&mut self) -> Result<String> {
        let Some(company_name) = self.current_company.clone() else {
            return Ok(
                "I need to research a company first. Please tell me which company you'd like to research."
                    .to_string(),
            );
        };

        let Some(bundle) = &self.research else {
            return Ok(format!(
                "I haven't gathered research data for {} yet. Ask me to research it first!",
                company_name
            ));
        };

        if bundle.success_count() < RECOMMENDED_SOURCES {
            warn!(
                company = %company_name,
                successful = bundle.success_count(),
                "Generating plan from limited research"
            );
        }

        let digest = prompts::research_digest(bundle);
        let mut response = format!("📝 Generating account plan for **{}**...\n\n", company_name);
        let mut plan = AccountPlan::new(&company_name);

        for section in Section::ALL {
            response.push_str(&format!("✍️ Writing: {}...\n", section.label()));
            let content = self.generate_section(section, &digest).await;
            plan.set(section, content);
        }

        response.push_str("\n✅ **Account plan generated successfully!**\n\n");
        response.push_str(&plan.render());

        let account_plan = self.account_plan.insert(plan);
        let path = account_plan.save(&self.plans_dir)?;

        response.push_str(&format!("\n💾 Plan saved to: {}\n", path.display()));
        response.push_str("\nYou can now:\n");
        response.push_str("- Ask me to update specific sections\n");
        response.push_str("- Request more research on specific areas\n");
        response.push_str("- Show the plan again at any time\n");

        Ok(response)
    }

    /// One model call per section. A failed call leaves a placeholder so the
    /// rest of the plan still gets written.
    async fn generate_section(&self, section: Section, research_digest: &str) -> String {
        let prompt = prompts::section_generation(section, research_digest);

        match self.model.generate(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(section = %section, "Section generation failed: {}", e);
                format!("[Content generation in progress - {}]", section.key())
            }
        }
    }

    // =============================
    // Section update
    // =============================

    async fn handle_section_update(&mut self, message: &str) -> Result<String> {
        let Some(plan) = self.account_plan.as_mut() else {
            return Ok(
                "I don't have an account plan to update. Would you like me to generate one first?"
                    .to_string(),
            );
        };

        let analysis = self
            .model
            .generate(&prompts::update_analysis(message))
            .await?;

        let Some(SectionUpdate {
            section,
            instruction,
        }) = parse_section_update(&analysis)
        else {
            debug!(analysis = %analysis, "Could not identify section to update");
            let options: Vec<String> = Section::ALL
                .iter()
                .map(|s| format!("- {}", s.label()))
                .collect();
            return Ok(format!(
                "I'm not sure which section you want to update. Please specify one of these sections:\n{}",
                options.join("\n")
            ));
        };

        let instruction = instruction.unwrap_or_else(|| message.to_string());
        let digest = self
            .research
            .as_ref()
            .map(prompts::research_digest)
            .unwrap_or_default();

        let prompt = prompts::section_rewrite(section, plan.get(section), &instruction, &digest);
        let updated = self.model.generate(&prompt).await?.trim().to_string();

        plan.set(section, updated.clone());
        info!(section = %section, "Section updated");

        let mut response = format!("✅ Updated **{}** section\n\n", section.label());
        response.push_str(&format!("**New Content:**\n{}\n\n", updated));
        response.push_str("Would you like to:\n");
        response.push_str("- Update another section\n");
        response.push_str("- View the complete updated plan\n");
        response.push_str("- Generate a fresh plan");

        Ok(response)
    }

    // =============================
    // Show / chat
    // =============================

    fn show_current_plan(&self) -> String {
        match &self.account_plan {
            Some(plan) => plan.render(),
            None => {
                "I haven't generated an account plan yet. Would you like me to create one?"
                    .to_string()
            }
        }
    }

    async fn handle_general_conversation(&self, message: &str) -> Result<String> {
        let window = self
            .history
            .formatted_window(CHAT_HISTORY_WINDOW, CHAT_HISTORY_MESSAGE_CHARS);
        let prompt = prompts::general_conversation(&window, message);

        Ok(self.model.generate(&prompt).await?.trim().to_string())
    }
}

/// Progress narrative shown after a research cycle.
fn research_summary(bundle: &ResearchBundle) -> String {
    let successful = bundle.success_count();
    let failed = bundle.failed().count();
    let mut out = String::new();

    out.push_str(&format!(
        "\n✅ Successfully gathered data from {} source(s)\n",
        successful
    ));
    if failed > 0 {
        out.push_str(&format!("⚠️ {} source(s) had issues\n", failed));
    }

    out.push_str("\n📊 **Research Summary:**\n\n");

    for source in bundle.successful() {
        match source.payload() {
            Some(SourcePayload::Encyclopedia { summary, .. }) => {
                out.push_str(&format!(
                    "**{}:**\n{}...\n\n",
                    source.source,
                    take_chars(summary, RESEARCH_EXCERPT_CHARS)
                ));
            }
            Some(SourcePayload::Scrape { url, .. }) => {
                out.push_str(&format!(
                    "**Website Content (scraped):**\nSuccessfully retrieved content from {}\n\n",
                    url
                ));
            }
            None => {}
        }
    }

    if successful < RECOMMENDED_SOURCES {
        out.push_str("⚠️ I found limited information. Would you like me to:\n");
        out.push_str("1. Try additional sources\n");
        out.push_str("2. Generate an account plan with available data\n");
        out.push_str("3. Focus on specific aspects of the company\n");
    } else {
        out.push_str("✨ I have enough information to generate a comprehensive account plan.\n");
        out.push_str("Would you like me to proceed with generating the account plan?");
    }

    out
}

//! Prompt templates sent to the language model

use crate::account_plan::Section;
use crate::models::{ResearchBundle, SourcePayload};
use crate::text::take_chars;

/// How much of each source's text goes into the research digest.
const DIGEST_SOURCE_CHARS: usize = 500;

/// Sentinel the model returns when it cannot answer an extraction prompt.
pub const UNKNOWN: &str = "UNKNOWN";

pub const SYSTEM_PROMPT: &str = r#"You are a professional company research assistant and account plan generator.

Your capabilities:
- Research companies using multiple data sources
- Synthesize findings into comprehensive account plans
- Provide real-time updates during research
- Ask clarifying questions when needed
- Handle updates to specific sections of account plans

Communication style:
- Professional yet conversational
- Proactive in asking for clarification
- Transparent about research progress and limitations
- Helpful and adaptive to user needs

When researching:
- Always inform the user what you're doing
- If information conflicts or is missing, ask if you should dig deeper
- Synthesize information from multiple sources
- Be honest about data quality and gaps

When generating account plans:
- Create comprehensive, actionable plans
- Structure information clearly across sections
- Base recommendations on researched data
- Be realistic about what you know vs. what you're inferring"#;

pub fn company_extraction(message: &str) -> String {
    format!(
        r#"Extract the company name from this user message: "{message}"

Return ONLY the company name, nothing else. If no company name is found, return "{UNKNOWN}".

Examples:
User: "Research Microsoft" -> Microsoft
User: "Tell me about Apple Inc" -> Apple Inc
User: "Find information on Tesla" -> Tesla
User: "What do you know?" -> {UNKNOWN}
"#
    )
}

pub fn website_lookup(company_name: &str) -> String {
    format!(
        "What is the official website URL for {company_name}? Return ONLY the URL \
         (e.g., https://example.com) or '{UNKNOWN}' if you don't know."
    )
}

fn section_instruction(section: Section) -> &'static str {
    match section {
        Section::ExecutiveSummary => "write a concise executive summary (3-4 sentences) highlighting the company's core business, market position, and why they're a strategic account",
        Section::CompanyOverview => "provide a comprehensive company overview including: founding, headquarters, industry, products/services, size, and recent developments",
        Section::MarketPosition => "analyze the company's market position, competitive landscape, market share, and industry trends affecting them",
        Section::KeyStakeholders => "identify likely key stakeholders and decision-makers (C-level, department heads). If specific names aren't available, describe typical roles",
        Section::BusinessChallenges => "analyze potential business challenges and opportunities the company might be facing based on their industry and size",
        Section::ValueProposition => "craft a compelling value proposition for how your organization could help this company (be professional and realistic)",
        Section::EngagementStrategy => "outline a strategic engagement approach including recommended touchpoints, timing, and messaging themes",
        Section::SuccessMetrics => "define measurable success metrics for this account (revenue targets, engagement metrics, strategic milestones)",
    }
}

pub fn section_generation(section: Section, research_digest: &str) -> String {
    format!(
        r#"Based on the following research data, {instruction}.

Research Data:
{research_digest}

Requirements:
- Be specific and data-driven where possible
- If information is limited, be honest and use reasonable industry assumptions
- Keep it professional and actionable
- Length: 100-150 words

Generate the content now:"#,
        instruction = section_instruction(section),
    )
}

pub fn update_analysis(message: &str) -> String {
    format!(
        r#"Analyze this user request for updating an account plan section:
User: "{message}"

Available sections:
{sections}

Extract:
1. Section name (must match one from the list)
2. What they want to update/change

Format your response as:
SECTION: [section_name]
UPDATE: [what to update]

If you can't determine the section, respond with:
SECTION: {UNKNOWN}
UPDATE: [summary of request]
"#,
        sections = Section::key_list(),
    )
}

pub fn section_rewrite(
    section: Section,
    current_content: &str,
    update_request: &str,
    research_digest: &str,
) -> String {
    format!(
        r#"Update the following section of an account plan based on the user's request.

Section: {label}
Current Content:
{current_content}

User's Update Request:
{update_request}

Research Data (for reference):
{research_digest}

Generate the UPDATED content (100-150 words):"#,
        label = section.label(),
    )
}

pub fn general_conversation(history_window: &str, message: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\nConversation history:\n{history_window}\nUser: {message}\n\n\
         Respond as the company research assistant:"
    )
}

/// Flatten a research bundle into the text block shared by every
/// generation prompt. Only successful sources contribute.
pub fn research_digest(bundle: &ResearchBundle) -> String {
    let mut digest = format!("Company: {}\n\n", bundle.company_name);
    digest.push_str("Available Information:\n");

    for source in bundle.successful() {
        digest.push_str(&format!("\nSource: {}\n", source.source));
        let text = match source.payload() {
            Some(SourcePayload::Encyclopedia { summary, .. }) => summary,
            Some(SourcePayload::Scrape { content, .. }) => content,
            None => continue,
        };
        digest.push_str(&format!(
            "Content: {}\n",
            take_chars(text, DIGEST_SOURCE_CHARS)
        ));
    }

    digest
}

//! Parsing of short structured replies from the language model
//!
//! Every parser returns `None` on anything it does not recognise; callers
//! treat that as "unknown" and ask the user to clarify.

use crate::account_plan::Section;
use crate::prompts::UNKNOWN;
use reqwest::Url;

const SECTION_LABEL: &str = "SECTION:";
const UPDATE_LABEL: &str = "UPDATE:";

/// Target and instruction pulled out of an update analysis reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionUpdate {
    pub section: Section,
    pub instruction: Option<String>,
}

/// Company name from an extraction reply, or `None` for the sentinel.
pub fn parse_company_name(reply: &str) -> Option<String> {
    let name = reply
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*'))
        .trim();

    // "Apple Inc." keeps its period; only the sentinel check ignores it.
    if name.is_empty() || name.trim_end_matches('.').eq_ignore_ascii_case(UNKNOWN) {
        return None;
    }
    Some(name.to_string())
}

/// Accepts only an absolute http(s) URL with a host.
pub fn parse_website_url(reply: &str) -> Option<String> {
    let candidate = reply.trim().trim_matches(|c: char| matches!(c, '<' | '>' | '`'));
    let url = Url::parse(candidate).ok()?;

    let web_scheme = matches!(url.scheme(), "http" | "https");
    if web_scheme && url.host_str().is_some() {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// Read the `SECTION:` / `UPDATE:` lines of an update analysis.
///
/// Returns `None` when the section line is missing, says `UNKNOWN`, or names
/// something outside the eight sections.
pub fn parse_section_update(reply: &str) -> Option<SectionUpdate> {
    let mut section = None;
    let mut instruction = None;

    for line in reply.lines().map(str::trim) {
        if let Some(value) = strip_label(line, SECTION_LABEL) {
            section = Some(value);
        } else if let Some(value) = strip_label(line, UPDATE_LABEL) {
            instruction = Some(value.to_string()).filter(|v| !v.is_empty());
        }
    }

    let section = section_from_reply(section?)?;
    Some(SectionUpdate {
        section,
        instruction,
    })
}

/// Model replies name sections loosely: any case, spaces or hyphens for
/// underscores, wrapped in brackets or markdown emphasis.
fn section_from_reply(value: &str) -> Option<Section> {
    let normalized = value
        .trim()
        .trim_matches(|c: char| matches!(c, '[' | ']' | '*' | '`' | '"' | '\''))
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_");

    Section::from_key(&normalized)
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim_start_matches('*');
    let head = line.get(..label.len())?;
    if head.eq_ignore_ascii_case(label) {
        Some(line[label.len()..].trim_matches(|c: char| c.is_whitespace() || c == '*'))
    } else {
        None
    }
}

//! Intent Classifier
//!
//! Maps a free-text message onto one of the agent's actions by substring
//! matching against fixed keyword lists. Lists are checked in priority
//! order and the first hit wins; anything else is general conversation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Research,
    GeneratePlan,
    UpdateSection,
    ShowPlan,
    General,
}

/// Static keyword lists — zero allocation
const RESEARCH_KEYWORDS: &[&str] = &[
    "research",
    "find out about",
    "tell me about",
    "information on",
    "look up",
];

const PLAN_KEYWORDS: &[&str] = &[
    "generate plan",
    "create plan",
    "account plan",
    "make a plan",
];

const UPDATE_KEYWORDS: &[&str] = &["update", "change", "modify", "edit"];

const SHOW_KEYWORDS: &[&str] = &["show plan", "display plan", "view plan", "see plan"];

/// Priority order matters: a message that mentions both research and an
/// update is a research request.
const RULES: &[(&[&str], Intent)] = &[
    (RESEARCH_KEYWORDS, Intent::Research),
    (PLAN_KEYWORDS, Intent::GeneratePlan),
    (UPDATE_KEYWORDS, Intent::UpdateSection),
    (SHOW_KEYWORDS, Intent::ShowPlan),
];

pub struct IntentClassifier;

impl IntentClassifier {
    pub fn classify(message: &str) -> Intent {
        let lowered = message.to_lowercase();

        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| lowered.contains(*kw)))
            .map(|(_, intent)| *intent)
            .unwrap_or(Intent::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_messages() {
        let cases = vec![
            ("Research Tesla", Intent::Research),
            ("generate plan", Intent::GeneratePlan),
            ("update the executive summary", Intent::UpdateSection),
            ("show plan", Intent::ShowPlan),
            ("hello", Intent::General),
        ];

        for (message, expected) in cases {
            assert_eq!(IntentClassifier::classify(message), expected, "{}", message);
        }
    }

    #[test]
    fn test_research_wins_over_update() {
        assert_eq!(
            IntentClassifier::classify("research Nvidia and update the plan"),
            Intent::Research
        );
    }

    #[test]
    fn test_plan_wins_over_update_and_show() {
        assert_eq!(
            IntentClassifier::classify("Please create plan, then show plan"),
            Intent::GeneratePlan
        );
        assert_eq!(
            IntentClassifier::classify("edit the account plan"),
            Intent::GeneratePlan
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(IntentClassifier::classify("TELL ME ABOUT Apple"), Intent::Research);
        assert_eq!(IntentClassifier::classify("View Plan"), Intent::ShowPlan);
    }

    #[test]
    fn test_keyword_free_is_general() {
        for message in ["what do you think?", "thanks!", ""] {
            assert_eq!(IntentClassifier::classify(message), Intent::General);
        }
    }
}

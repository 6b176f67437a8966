//! Keyword intent classification and complexity assessment.
//!
//! Intent rules are tried in `INTENT_PRIORITY` order and the first rule with
//! any keyword present (substring match on the lowercased query) wins.

use crate::types::{ComplexityTier, QueryIntent};

pub struct IntentRule {
    pub intent: QueryIntent,
    pub keywords: &'static [&'static str],
}

pub const INTENT_PRIORITY: &[IntentRule] = &[
    IntentRule {
        intent: QueryIntent::DocumentGeneration,
        keywords: &["generate", "create", "draft", "make", "prepare", "write"],
    },
    IntentRule {
        intent: QueryIntent::Calculation,
        keywords: &["calculate", "compute", "how much", "total", "sum", "percentage", "%"],
    },
    IntentRule {
        intent: QueryIntent::Comparison,
        keywords: &["compare", "vs", "versus", "difference", "better", "pros and cons"],
    },
    IntentRule {
        intent: QueryIntent::Analysis,
        keywords: &["analyze", "review", "check", "verify", "validate", "assess"],
    },
];

/// Tokens counted as legal terms. Matching is per whitespace token, so the
/// two-word "governing law" entry never matches on its own.
pub const LEGAL_TERMS: &[&str] = &[
    "agreement",
    "contract",
    "clause",
    "jurisdiction",
    "liability",
    "indemnification",
    "confidentiality",
    "arbitration",
    "remedies",
    "warranty",
    "termination",
    "amendment",
    "assignment",
    "governing law",
];

#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {}
    }

    pub fn classify(&self, query: &str) -> QueryIntent {
        let query_lower = query.to_lowercase();
        INTENT_PRIORITY
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| query_lower.contains(k)))
            .map(|rule| rule.intent)
            .unwrap_or(QueryIntent::GeneralQuery)
    }

    pub fn assess_complexity(&self, query: &str) -> ComplexityTier {
        let word_count = query.split_whitespace().count();
        let legal_terms = query
            .split_whitespace()
            .filter(|word| is_legal_term(word))
            .count();

        if word_count > 15 || legal_terms > 3 {
            ComplexityTier::High
        } else if word_count > 8 || legal_terms > 1 {
            ComplexityTier::Medium
        } else {
            ComplexityTier::Low
        }
    }
}

pub fn is_legal_term(word: &str) -> bool {
    let word = word.to_lowercase();
    LEGAL_TERMS.contains(&word.as_str())
}

pub fn classify_intent(query: &str) -> (QueryIntent, ComplexityTier) {
    let classifier = IntentClassifier::new();
    (classifier.classify(query), classifier.assess_complexity(query))
}

//! Keyword relevance scoring of a query against a single corpus record.
//!
//! Two additive tiers, clamped to 1.0 at the end:
//! - type keywords: the query names a document family and the record's name
//!   belongs to it
//! - content: long query words that occur in the record's answer text

use std::collections::HashSet;

use crate::types::DocumentRecord;

pub struct TypeRule {
    pub trigger: &'static str,
    pub name_keywords: &'static [&'static str],
    pub weight: f32,
}

pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule { trigger: "nda", name_keywords: &["nda", "non-disclosure"], weight: 1.0 },
    TypeRule { trigger: "employment", name_keywords: &["employment", "employee"], weight: 1.0 },
    TypeRule { trigger: "llc", name_keywords: &["llc"], weight: 1.0 },
    TypeRule { trigger: "partnership", name_keywords: &["partnership"], weight: 1.0 },
    TypeRule { trigger: "contract", name_keywords: &["contract"], weight: 0.8 },
    TypeRule { trigger: "agreement", name_keywords: &["agreement"], weight: 0.8 },
];

pub const CONTENT_MIN_WORD_LEN: usize = 4;
pub const CONTENT_INCREMENT: f32 = 0.1;

/// Score `query` against `doc`. The query is lowercased here, so callers may
/// pass it in any case. Result is always within `[0.0, 1.0]`.
pub fn score_relevance(query: &str, doc: &DocumentRecord) -> f32 {
    let query = query.to_lowercase();
    let name = doc.name.to_lowercase();
    let content = doc.answer.to_lowercase();

    let mut score: f32 = TYPE_RULES
        .iter()
        .filter(|rule| query.contains(rule.trigger))
        .filter(|rule| rule.name_keywords.iter().any(|k| name.contains(k)))
        .map(|rule| rule.weight)
        .sum();

    let words: HashSet<&str> = query.split_whitespace().collect();
    for word in words {
        if word.chars().count() > CONTENT_MIN_WORD_LEN && content.contains(word) {
            score += CONTENT_INCREMENT;
        }
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn doc(name: &str, answer: &str) -> DocumentRecord {
        DocumentRecord {
            prompt: format!("Generate a document: {}", name),
            answer: answer.to_string(),
            name: name.to_string(),
            category: crate::corpus::classify_name(name),
        }
    }

    #[test]
    fn test_type_keyword_match() {
        let d = doc("Mutual Non-Disclosure Agreement", "");
        assert_eq!(score_relevance("mutual nda please", &d), 1.0);
    }

    #[test]
    fn test_trigger_without_name_match_scores_nothing() {
        let d = doc("Office Lease", "");
        assert_eq!(score_relevance("nda", &d), 0.0);
    }

    #[test]
    fn test_content_tier_increments() {
        let d = doc("Office Lease", "the tenant shall maintain the premises");
        let score = score_relevance("tenant premises shall", &d);
        assert!((score - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_short_words_ignored() {
        let d = doc("Office Lease", "rent is due");
        assert_eq!(score_relevance("rent is due", &d), 0.0);
    }

    #[test]
    fn test_duplicate_query_words_count_once() {
        let d = doc("Office Lease", "premises");
        let score = score_relevance("premises premises premises", &d);
        assert!((score - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_clamped_to_one() {
        let d = doc(
            "Employment Contract Agreement",
            "employment contract agreement salary benefits duties",
        );
        let score = score_relevance("employment contract agreement salary benefits duties", &d);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let d = doc("Workplace Safety Policy", "wear protective equipment");
        assert_eq!(d.category, Category::Policy);
        assert_eq!(score_relevance("zebra migration", &d), 0.0);
    }

    #[test]
    fn test_score_always_in_range() {
        let d = doc("LLC Partnership NDA Employment Contract Agreement", "x");
        for q in ["", "nda llc partnership employment contract agreement", "x"] {
            let s = score_relevance(q, &d);
            assert!((0.0..=1.0).contains(&s), "score {} out of range for {:?}", s, q);
        }
    }
}

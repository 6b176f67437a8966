//! Corpus entry parsing.
//!
//! Raw entries are shaped `"<prompt>Answer:<answer>"`. The split happens on the
//! first `Answer:` marker only, so answers may themselves contain the marker.
//! Entries without the marker are not documents and are dropped.

use std::sync::LazyLock;

use crate::types::{Category, DocumentRecord};

pub const ANSWER_MARKER: &str = "Answer:";
pub const UNKNOWN_DOCUMENT: &str = "Unknown Document";

static DOC_NAME_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"Generate a document:\s*(.+)").expect("document name regex is valid")
});

/// Ordered keyword groups for category assignment. First match wins.
pub const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["nda", "non-disclosure", "confidentiality"], Category::Nda),
    (&["employment", "employee", "work contract"], Category::Employment),
    (
        &["llc", "operating agreement", "partnership", "business"],
        Category::Business,
    ),
    (&["contract", "agreement"], Category::Contract),
    (&["policy", "guideline", "procedure"], Category::Policy),
    (&["notice", "warning", "termination"], Category::Hr),
    (&["safety", "health", "workplace"], Category::Compliance),
];

/// Parse one raw entry. Returns `None` when the entry has no answer marker.
pub fn parse_entry(raw: &str) -> Option<DocumentRecord> {
    let (prompt, answer) = raw.split_once(ANSWER_MARKER)?;
    let prompt = prompt.trim().to_string();
    let answer = answer.trim().to_string();
    let name = extract_doc_name(&prompt);
    let category = classify_name(&name);

    Some(DocumentRecord {
        prompt,
        answer,
        name,
        category,
    })
}

pub fn extract_doc_name(prompt: &str) -> String {
    DOC_NAME_RE
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_DOCUMENT.to_string())
}

pub fn classify_name(name: &str) -> Category {
    let name_lower = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name_lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::General)
}

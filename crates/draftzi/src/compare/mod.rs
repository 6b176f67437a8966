//! Document-type comparison.
//!
//! Resolves which two document types a query is asking about, looks the pair
//! up in a curated knowledge table keyed by the sorted pair, and attaches a
//! short outline of each side produced by the document generator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use crate::generation::{generate_with_timeout, DocumentGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentLabel {
    Nda,
    ConfidentialityAgreement,
    EmploymentContract,
    ConsultingAgreement,
    PartnershipAgreement,
    LlcAgreement,
    RentalAgreement,
    LeaseAgreement,
    Contract,
}

impl DocumentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nda => "NDA",
            Self::ConfidentialityAgreement => "Confidentiality Agreement",
            Self::EmploymentContract => "Employment Contract",
            Self::ConsultingAgreement => "Consulting Agreement",
            Self::PartnershipAgreement => "Partnership Agreement",
            Self::LlcAgreement => "LLC Agreement",
            Self::RentalAgreement => "Rental Agreement",
            Self::LeaseAgreement => "Lease Agreement",
            Self::Contract => "Contract",
        }
    }
}

impl fmt::Display for DocumentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query keyword to label, scanned in this order.
pub const LABEL_KEYWORDS: &[(&str, DocumentLabel)] = &[
    ("nda", DocumentLabel::Nda),
    ("non-disclosure", DocumentLabel::Nda),
    ("confidentiality", DocumentLabel::ConfidentialityAgreement),
    ("employment", DocumentLabel::EmploymentContract),
    ("partnership", DocumentLabel::PartnershipAgreement),
    ("llc", DocumentLabel::LlcAgreement),
    ("rental", DocumentLabel::RentalAgreement),
    ("lease", DocumentLabel::LeaseAgreement),
    ("contract", DocumentLabel::Contract),
];

/// Keyword pairs implying a comparison when fewer than two labels were found.
pub const IMPLIED_PAIRS: &[(&str, &str, DocumentLabel, DocumentLabel)] = &[
    (
        "partnership",
        "llc",
        DocumentLabel::PartnershipAgreement,
        DocumentLabel::LlcAgreement,
    ),
    (
        "nda",
        "confidential",
        DocumentLabel::Nda,
        DocumentLabel::ConfidentialityAgreement,
    ),
    (
        "employment",
        "consult",
        DocumentLabel::EmploymentContract,
        DocumentLabel::ConsultingAgreement,
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonNotes {
    pub differences: &'static str,
    pub use_cases: &'static str,
}

pub const GENERIC_NOTES: ComparisonNotes = ComparisonNotes {
    differences: "Different legal structures and liability considerations",
    use_cases: "Choose based on business needs and legal protection required",
};

pub const NO_STRUCTURE_SUMMARY: &str = "Standard legal document structure";

const SUMMARY_MARKERS: &[&str] = &["section", "key", "1.", "2.", "3."];
const SUMMARY_MIN_LINE_LEN: usize = 10;
const SUMMARY_MAX_LINES: usize = 6;

type PairKey = (DocumentLabel, DocumentLabel);

pub fn canonical_pair(a: DocumentLabel, b: DocumentLabel) -> PairKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

static KNOWLEDGE: LazyLock<HashMap<PairKey, ComparisonNotes>> = LazyLock::new(|| {
    let entries = [
        (
            DocumentLabel::Nda,
            DocumentLabel::ConfidentialityAgreement,
            ComparisonNotes {
                differences: "NDA is broader for business secrets, Confidentiality Agreement is for specific information",
                use_cases: "Use NDA for general business partnerships, Confidentiality for specific data sharing",
            },
        ),
        (
            DocumentLabel::EmploymentContract,
            DocumentLabel::ConsultingAgreement,
            ComparisonNotes {
                differences: "Employment for full-time staff with benefits, Consulting for project-based work",
                use_cases: "Employment for permanent roles, Consulting for temporary projects",
            },
        ),
        (
            DocumentLabel::PartnershipAgreement,
            DocumentLabel::LlcAgreement,
            ComparisonNotes {
                differences: "Partnership has simpler structure but unlimited liability, LLC offers liability protection but more formalities",
                use_cases: "Partnership for small informal businesses, LLC for asset protection",
            },
        ),
        (
            DocumentLabel::RentalAgreement,
            DocumentLabel::LeaseAgreement,
            ComparisonNotes {
                differences: "Rental Agreement usually runs month-to-month and renews automatically, Lease fixes rent and term for a set period",
                use_cases: "Rental for flexible short-term occupancy, Lease for long-term stability and predictable rent",
            },
        ),
    ];

    entries
        .into_iter()
        .map(|(a, b, notes)| (canonical_pair(a, b), notes))
        .collect()
});

/// Distinct labels mentioned by the query, in `LABEL_KEYWORDS` order.
pub fn extract_labels(query: &str) -> Vec<DocumentLabel> {
    let query_lower = query.to_lowercase();
    let mut labels = Vec::new();
    for (keyword, label) in LABEL_KEYWORDS {
        if query_lower.contains(keyword) && !labels.contains(label) {
            labels.push(*label);
        }
    }
    labels
}

/// The pair of document types to compare, if the query names or implies one.
pub fn resolve_pair(query: &str) -> Option<(DocumentLabel, DocumentLabel)> {
    let labels = extract_labels(query);
    if let [first, second, ..] = labels.as_slice() {
        return Some((*first, *second));
    }

    let query_lower = query.to_lowercase();
    IMPLIED_PAIRS
        .iter()
        .find(|(k1, k2, _, _)| query_lower.contains(k1) && query_lower.contains(k2))
        .map(|(_, _, a, b)| (*a, *b))
}

/// Curated notes for a pair, in either order; generic text for unknown pairs.
pub fn lookup_notes(a: DocumentLabel, b: DocumentLabel) -> ComparisonNotes {
    KNOWLEDGE
        .get(&canonical_pair(a, b))
        .cloned()
        .unwrap_or(GENERIC_NOTES)
}

pub fn is_curated(a: DocumentLabel, b: DocumentLabel) -> bool {
    KNOWLEDGE.contains_key(&canonical_pair(a, b))
}

/// First few structural lines of a generated document.
pub fn summarize_document(document: &str) -> String {
    let key_lines: Vec<&str> = document
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            SUMMARY_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(str::trim)
        .filter(|line| line.chars().count() > SUMMARY_MIN_LINE_LEN)
        .take(SUMMARY_MAX_LINES)
        .collect();

    if key_lines.is_empty() {
        NO_STRUCTURE_SUMMARY.to_string()
    } else {
        key_lines.join("\n")
    }
}

pub fn available_comparisons(query: &str) -> String {
    format!(
        "📊 **Document Comparison**\n\n\
         Your query: \"{}\"\n\n\
         🔍 **I can compare these document types**:\n\
         - Partnership Agreement vs LLC Agreement\n\
         - NDA vs Confidentiality Agreement\n\
         - Employment Contract vs Consulting Agreement\n\
         - Rental Agreement vs Lease Agreement\n\n\
         💡 **Try**: \"Compare partnership and LLC agreements\"",
        query
    )
}

pub struct ComparisonEngine {
    timeout: Duration,
}

impl ComparisonEngine {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn compare(&self, query: &str, generator: &dyn DocumentGenerator) -> String {
        match resolve_pair(query) {
            Some((a, b)) => self.compare_pair(a, b, generator).await,
            None => available_comparisons(query),
        }
    }

    pub async fn compare_pair(
        &self,
        a: DocumentLabel,
        b: DocumentLabel,
        generator: &dyn DocumentGenerator,
    ) -> String {
        let request_a = format!("generate {}", a);
        let request_b = format!("generate {}", b);
        let (doc_a, doc_b) = tokio::join!(
            generate_with_timeout(generator, &request_a, self.timeout),
            generate_with_timeout(generator, &request_b, self.timeout),
        );

        let summary_a = doc_a.map_or_else(|_| NO_STRUCTURE_SUMMARY.to_string(), |d| summarize_document(&d));
        let summary_b = doc_b.map_or_else(|_| NO_STRUCTURE_SUMMARY.to_string(), |d| summarize_document(&d));
        let notes = lookup_notes(a, b);

        tracing::debug!(left = %a, right = %b, curated = is_curated(a, b), "[Comparison] Compared document types");

        format!(
            "⚖️ **DOCUMENT COMPARISON**: {a} vs {b}\n\n\
             📄 **{a} Overview**:\n{summary_a}\n\n\
             📄 **{b} Overview**:\n{summary_b}\n\n\
             🔍 **Key Differences**:\n{differences}\n\n\
             💡 **When to Use**:\n{use_cases}\n\n\
             ✅ **Recommendation**: Consult legal counsel to determine the best fit for your situation",
            differences = notes.differences,
            use_cases = notes.use_cases,
        )
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Compare with the default generation timeout.
pub async fn compare(query: &str, generator: &dyn DocumentGenerator) -> String {
    ComparisonEngine::default().compare(query, generator).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::OutlineGenerator;

    #[test]
    fn test_extract_labels_in_mapping_order() {
        assert_eq!(
            extract_labels("Compare partnership and LLC agreements"),
            vec![DocumentLabel::PartnershipAgreement, DocumentLabel::LlcAgreement]
        );
        // mapping order, not query order
        assert_eq!(
            extract_labels("lease or nda"),
            vec![DocumentLabel::Nda, DocumentLabel::LeaseAgreement]
        );
        // nda and non-disclosure collapse to one label
        assert_eq!(extract_labels("NDA / non-disclosure"), vec![DocumentLabel::Nda]);
    }

    #[test]
    fn test_implied_pairs() {
        assert_eq!(
            resolve_pair("nda or something confidential?"),
            Some((DocumentLabel::Nda, DocumentLabel::ConfidentialityAgreement))
        );
        assert_eq!(
            resolve_pair("employment or consulting?"),
            Some((DocumentLabel::EmploymentContract, DocumentLabel::ConsultingAgreement))
        );
        assert_eq!(resolve_pair("which is better?"), None);
    }

    #[test]
    fn test_lookup_is_order_independent() {
        let forward = lookup_notes(DocumentLabel::PartnershipAgreement, DocumentLabel::LlcAgreement);
        let reverse = lookup_notes(DocumentLabel::LlcAgreement, DocumentLabel::PartnershipAgreement);
        assert_eq!(forward, reverse);
        assert_ne!(forward, GENERIC_NOTES);
        assert_eq!(
            lookup_notes(DocumentLabel::ConfidentialityAgreement, DocumentLabel::Nda).use_cases,
            "Use NDA for general business partnerships, Confidentiality for specific data sharing"
        );
    }

    #[test]
    fn test_unknown_pair_gets_generic_notes() {
        assert_eq!(
            lookup_notes(DocumentLabel::Nda, DocumentLabel::LeaseAgreement),
            GENERIC_NOTES
        );
        assert!(!is_curated(DocumentLabel::Nda, DocumentLabel::LeaseAgreement));
    }

    #[test]
    fn test_summarize_document() {
        let doc = "Title\nSECTION 1: Parties involved\nshort 1.\nKey obligations of both sides\n\
                   2. Payment terms apply\nnothing here\n3. Term and renewal\n";
        let summary = summarize_document(doc);
        assert_eq!(
            summary,
            "SECTION 1: Parties involved\nKey obligations of both sides\n2. Payment terms apply\n3. Term and renewal"
        );
        assert_eq!(summarize_document("plain prose"), NO_STRUCTURE_SUMMARY);
    }

    #[test]
    fn test_summary_caps_at_six_lines() {
        let doc = (0..10)
            .map(|i| format!("Section {} heading text", i))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(summarize_document(&doc).lines().count(), 6);
    }

    #[tokio::test]
    async fn test_compare_partnership_llc_uses_curated_entry() {
        let text = compare("Compare partnership and LLC agreements", &OutlineGenerator).await;
        assert!(text.contains("**DOCUMENT COMPARISON**: Partnership Agreement vs LLC Agreement"));
        assert!(text.contains("Partnership has simpler structure but unlimited liability"));
        assert!(text.contains("Partnership for small informal businesses"));
        assert!(!text.contains(GENERIC_NOTES.differences));
        assert!(text.contains("KEY SECTIONS:"));
    }

    #[tokio::test]
    async fn test_compare_without_pair_lists_options() {
        let text = compare("compare these two", &OutlineGenerator).await;
        assert!(text.contains("I can compare these document types"));
        assert!(text.contains("compare these two"));
    }
}

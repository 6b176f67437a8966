//! Retrieval over the in-memory corpus.
//!
//! Scores a bounded prefix of the corpus, keeps candidates above the
//! candidate threshold, ranks them (stable on ties so corpus order breaks
//! them), then applies a stricter relevance gate before truncating.

use rayon::prelude::*;
use std::collections::HashMap;

use super::scorer::score_relevance;
use crate::config::SearchConfig;
use crate::corpus::Corpus;
use crate::types::{Category, RelevanceResult, SearchResponse};

pub const NO_MATCH_MESSAGE: &str = "No specific legal documents matched your query exactly. \
Try using more specific terms or browse general legal templates.";

/// When the query names a document family, only records of the matching
/// categories survive the relevance gate.
pub struct FamilyGate {
    pub triggers: &'static [&'static str],
    pub allowed: &'static [Category],
}

pub const FAMILY_GATES: &[FamilyGate] = &[
    FamilyGate { triggers: &["nda"], allowed: &[Category::Nda] },
    FamilyGate { triggers: &["employment"], allowed: &[Category::Employment, Category::Hr] },
    FamilyGate {
        triggers: &["llc", "partnership", "business"],
        allowed: &[Category::Business],
    },
];

#[derive(Debug, Clone, Default)]
pub struct Retriever {
    config: SearchConfig,
}

impl Retriever {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Ranked listing, truncated to `listing_k`.
    pub fn search(&self, query: &str, corpus: &Corpus) -> SearchResponse {
        self.search_top(query, corpus, self.config.listing_k)
    }

    /// Compact summary, truncated to `summary_k`.
    pub fn search_compact(&self, query: &str, corpus: &Corpus) -> SearchResponse {
        self.search_top(query, corpus, self.config.summary_k)
    }

    /// Run independent searches in parallel. Output order matches `queries`.
    pub fn search_batch<S>(&self, queries: &[S], corpus: &Corpus) -> Vec<SearchResponse>
    where
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|q| self.search(q.as_ref(), corpus))
            .collect()
    }

    pub fn search_top(&self, query: &str, corpus: &Corpus, k: usize) -> SearchResponse {
        let query_lower = query.to_lowercase();

        let mut candidates: Vec<RelevanceResult> = corpus
            .window(self.config.scan_window)
            .iter()
            .enumerate()
            .filter_map(|(index, doc)| {
                let score = score_relevance(&query_lower, doc);
                (score > self.config.candidate_threshold).then(|| RelevanceResult {
                    index,
                    name: doc.name.clone(),
                    category: doc.category,
                    score,
                    preview: preview(&doc.answer, self.config.preview_chars),
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        let relevant: Vec<RelevanceResult> = candidates
            .into_iter()
            .filter(|r| self.is_truly_relevant(&query_lower, r))
            .collect();

        let answer = summarize_results(&query_lower, &relevant);
        let relevant_count = relevant.len();

        tracing::debug!(
            relevant = relevant_count,
            scanned = corpus.window(self.config.scan_window).len(),
            total = corpus.len(),
            "[Retrieval] Search complete"
        );

        let mut results = relevant;
        results.truncate(k);

        SearchResponse {
            query: query.to_string(),
            relevant_count,
            total_documents: corpus.len(),
            results,
            answer,
        }
    }

    fn is_truly_relevant(&self, query_lower: &str, result: &RelevanceResult) -> bool {
        if result.score < self.config.relevance_threshold {
            return false;
        }
        FAMILY_GATES
            .iter()
            .filter(|gate| gate.triggers.iter().any(|t| query_lower.contains(t)))
            .all(|gate| gate.allowed.contains(&result.category))
    }
}

/// Search with the default configuration.
pub fn search(query: &str, corpus: &Corpus) -> SearchResponse {
    Retriever::default().search(query, corpus)
}

pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// One-sentence description of what a search found.
pub fn summarize_results(query_lower: &str, results: &[RelevanceResult]) -> String {
    if results.is_empty() {
        return NO_MATCH_MESSAGE.to_string();
    }

    let n = results.len();
    if query_lower.contains("nda") {
        format!(
            "Found {} Non-Disclosure Agreement templates. These include mutual and one-way NDAs \
             with comprehensive confidentiality clauses.",
            n
        )
    } else if query_lower.contains("employment") {
        format!(
            "Found {} employment-related documents including contracts, policies, and workplace guidelines.",
            n
        )
    } else if ["llc", "partnership", "business"]
        .iter()
        .any(|k| query_lower.contains(k))
    {
        format!(
            "Found {} business formation documents covering entity structure, governance, and operational agreements.",
            n
        )
    } else {
        format!(
            "Found {} relevant legal documents. The most common type is {} documents.",
            n,
            most_common_category(results)
        )
    }
}

/// Most frequent category; ties go to the category seen first.
fn most_common_category(results: &[RelevanceResult]) -> Category {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    let mut order: Vec<Category> = Vec::new();
    for r in results {
        let count = counts.entry(r.category).or_insert(0);
        if *count == 0 {
            order.push(r.category);
        }
        *count += 1;
    }

    let mut best = Category::General;
    let mut best_count = 0;
    for category in order {
        let count = counts[&category];
        if count > best_count {
            best = category;
            best_count = count;
        }
    }
    best
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed document-type label assigned to every corpus record at parse time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nda,
    Employment,
    Business,
    Contract,
    Policy,
    Hr,
    Compliance,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nda => "nda",
            Self::Employment => "employment",
            Self::Business => "business",
            Self::Contract => "contract",
            Self::Policy => "policy",
            Self::Hr => "hr",
            Self::Compliance => "compliance",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed corpus entry. Immutable once the corpus is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    pub prompt: String,
    pub answer: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    DocumentGeneration,
    Calculation,
    Comparison,
    Analysis,
    GeneralQuery,
}

impl QueryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentGeneration => "document_generation",
            Self::Calculation => "calculation",
            Self::Comparison => "comparison",
            Self::Analysis => "analysis",
            Self::GeneralQuery => "general_query",
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// One ranked retrieval hit. Lives only as long as the query that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelevanceResult {
    /// Position of the record in the corpus it was scored against.
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub score: f32,
    pub preview: String,
}

/// Envelope returned by a retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    /// Number of records that passed the relevance gate, before truncation.
    pub relevant_count: usize,
    pub total_documents: usize,
    pub results: Vec<RelevanceResult>,
    pub answer: String,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

pub mod agent;
pub mod calc;
pub mod compare;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generation;
pub mod routing;
pub mod search;
pub mod types;

// Re-export primary types for convenience
pub use agent::{AgentResponse, LegalAgent};
pub use config::DraftziConfig;
pub use corpus::{load_corpus, Corpus, CorpusHandle, CorpusSource, JsonFileSource};
pub use error::{DraftziError, Result};
pub use generation::{DocumentGenerator, OutlineGenerator};
pub use types::{
    Category, ComplexityTier, DocumentRecord, QueryIntent, RelevanceResult, SearchResponse,
};

// Pipeline entry points
pub use calc::calculate;
pub use compare::compare;
pub use routing::classify_intent;
pub use search::search;

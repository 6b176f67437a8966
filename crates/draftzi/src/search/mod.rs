pub mod filter;
pub mod scorer;

pub use filter::{
    preview, search, summarize_results, FamilyGate, Retriever, FAMILY_GATES, NO_MATCH_MESSAGE,
};
pub use scorer::{score_relevance, TypeRule, CONTENT_INCREMENT, CONTENT_MIN_WORD_LEN, TYPE_RULES};

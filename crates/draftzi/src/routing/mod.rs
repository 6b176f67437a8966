pub mod intent;

pub use intent::{classify_intent, is_legal_term, IntentClassifier, IntentRule, INTENT_PRIORITY, LEGAL_TERMS};

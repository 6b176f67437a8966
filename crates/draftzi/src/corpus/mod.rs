pub mod parser;
pub mod source;
pub mod store;

pub use parser::{classify_name, extract_doc_name, parse_entry, ANSWER_MARKER, UNKNOWN_DOCUMENT};
pub use source::{load_corpus, AdapterConfig, CorpusSource, JsonFileSource, LoadedCorpus, StaticSource};
pub use store::{Corpus, CorpusHandle};

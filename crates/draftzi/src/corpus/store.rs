use parking_lot::RwLock;
use std::sync::Arc;

use super::parser::parse_entry;
use crate::types::DocumentRecord;

/// Immutable, insertion-ordered snapshot of parsed documents.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<DocumentRecord>,
    dropped: usize,
}

impl Corpus {
    /// Parse raw entries into a corpus, silently dropping entries that lack
    /// the answer marker. The number dropped is kept for diagnostics.
    pub fn from_raw<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut dropped = 0;
        for entry in entries {
            match parse_entry(entry.as_ref()) {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, kept = records.len(), "[Corpus] Dropped entries without answer marker");
        }

        Self { records, dropped }
    }

    pub fn from_records(records: Vec<DocumentRecord>) -> Self {
        Self { records, dropped: 0 }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn get(&self, index: usize) -> Option<&DocumentRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    /// The first `n` records, or all of them if the corpus is shorter.
    pub fn window(&self, n: usize) -> &[DocumentRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

/// Shared handle to the live corpus snapshot.
///
/// Readers clone the inner `Arc` and never hold the lock while scoring.
/// A reload replaces the whole snapshot; the live one is never mutated.
#[derive(Debug, Clone, Default)]
pub struct CorpusHandle {
    current: Arc<RwLock<Arc<Corpus>>>,
}

impl CorpusHandle {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(corpus))),
        }
    }

    pub fn snapshot(&self) -> Arc<Corpus> {
        Arc::clone(&*self.current.read())
    }

    /// Swap in a new snapshot, returning the previous one.
    pub fn replace(&self, corpus: Corpus) -> Arc<Corpus> {
        let next = Arc::new(corpus);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        tracing::info!(
            previous = previous.len(),
            current = self.current.read().len(),
            "[Corpus] Snapshot replaced"
        );
        previous
    }
}

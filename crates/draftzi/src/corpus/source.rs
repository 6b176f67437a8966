//! Corpus suppliers.
//!
//! Fetching the files (bucket download, credentials) happens elsewhere; a
//! source only hands over raw entries and the adapter configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::store::Corpus;
use crate::config::CorpusConfig;
use crate::error::Result;

/// Adapter configuration. Only the base model identifier is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdapterConfig {
    #[serde(default)]
    pub base_model_name_or_path: Option<String>,
}

impl AdapterConfig {
    pub fn base_model(&self) -> &str {
        self.base_model_name_or_path.as_deref().unwrap_or("Unknown")
    }
}

pub trait CorpusSource {
    /// Raw `"<prompt>Answer:<answer>"` entries, in corpus order.
    fn raw_entries(&self) -> Result<Vec<String>>;

    fn adapter_config(&self) -> Result<AdapterConfig>;
}

/// Reads the mapping (a JSON array of strings) and adapter config from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    mapping_file: PathBuf,
    adapter_config_file: PathBuf,
}

impl JsonFileSource {
    pub fn new(mapping_file: impl Into<PathBuf>, adapter_config_file: impl Into<PathBuf>) -> Self {
        Self {
            mapping_file: mapping_file.into(),
            adapter_config_file: adapter_config_file.into(),
        }
    }

    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new(&config.mapping_file, &config.adapter_config_file)
    }
}

impl CorpusSource for JsonFileSource {
    fn raw_entries(&self) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(&self.mapping_file)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn adapter_config(&self) -> Result<AdapterConfig> {
        let content = std::fs::read_to_string(&self.adapter_config_file)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Entries already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub entries: Vec<String>,
    pub adapter: AdapterConfig,
}

impl CorpusSource for StaticSource {
    fn raw_entries(&self) -> Result<Vec<String>> {
        Ok(self.entries.clone())
    }

    fn adapter_config(&self) -> Result<AdapterConfig> {
        Ok(self.adapter.clone())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub corpus: Corpus,
    pub base_model: String,
}

pub fn load_corpus(source: &dyn CorpusSource) -> Result<LoadedCorpus> {
    let entries = source.raw_entries()?;
    let adapter = source.adapter_config()?;
    let corpus = Corpus::from_raw(&entries);

    tracing::info!(
        documents = corpus.len(),
        dropped = corpus.dropped(),
        model = adapter.base_model(),
        "[Corpus] Loaded legal documents"
    );

    Ok(LoadedCorpus {
        corpus,
        base_model: adapter.base_model().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DraftziError;
    use std::io::Write;

    #[test]
    fn test_json_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = dir.path().join("legal_mapping.json");
        let adapter = dir.path().join("adapter_config.json");

        let mut f = std::fs::File::create(&mapping).unwrap();
        write!(
            f,
            r#"["Generate a document: Mutual NDA Answer: body", "garbage"]"#
        )
        .unwrap();
        let mut f = std::fs::File::create(&adapter).unwrap();
        write!(
            f,
            r#"{{"base_model_name_or_path": "mistral-7b", "r": 16}}"#
        )
        .unwrap();

        let loaded = load_corpus(&JsonFileSource::new(&mapping, &adapter)).unwrap();
        assert_eq!(loaded.corpus.len(), 1);
        assert_eq!(loaded.corpus.dropped(), 1);
        assert_eq!(loaded.base_model, "mistral-7b");
    }

    #[test]
    fn test_missing_base_model_is_unknown() {
        let source = StaticSource {
            entries: vec!["a Answer: b".to_string()],
            adapter: AdapterConfig::default(),
        };
        let loaded = load_corpus(&source).unwrap();
        assert_eq!(loaded.base_model, "Unknown");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::from_config(&CorpusConfig::in_dir(dir.path()));
        assert!(matches!(load_corpus(&source), Err(DraftziError::Io(_))));
    }
}

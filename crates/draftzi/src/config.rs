use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DraftziError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftziConfig {
    pub data_dir: PathBuf,
    pub corpus: CorpusConfig,
    pub search: SearchConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// JSON array of raw `"<prompt>Answer:<answer>"` entries.
    pub mapping_file: PathBuf,
    /// Adapter config; only `base_model_name_or_path` is read from it.
    pub adapter_config_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Only the first `scan_window` records are scored per query.
    pub scan_window: usize,
    pub candidate_threshold: f32,
    pub relevance_threshold: f32,
    pub listing_k: usize,
    pub summary_k: usize,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub timeout_secs: u64,
}

impl DraftziConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.scan_window == 0 {
            return Err(DraftziError::Config("search.scan_window must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&search.candidate_threshold) {
            return Err(DraftziError::Config(
                "search.candidate_threshold must be in [0.0, 1.0]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&search.relevance_threshold) {
            return Err(DraftziError::Config(
                "search.relevance_threshold must be in [0.0, 1.0]".into(),
            ));
        }
        if search.listing_k == 0 || search.summary_k == 0 {
            return Err(DraftziError::Config(
                "search.listing_k and search.summary_k must be > 0".into(),
            ));
        }
        if self.generation.timeout_secs == 0 {
            return Err(DraftziError::Config(
                "generation.timeout_secs must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Load config from a JSON file, falling back to defaults for missing fields.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for DraftziConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("draftzi");

        Self {
            corpus: CorpusConfig::in_dir(&data_dir),
            data_dir,
            search: SearchConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl CorpusConfig {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            mapping_file: dir.join("legal_mapping.json"),
            adapter_config_file: dir.join("adapter_config.json"),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            scan_window: 200,
            candidate_threshold: 0.2,
            relevance_threshold: 0.3,
            listing_k: 5,
            summary_k: 3,
            preview_chars: 200,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

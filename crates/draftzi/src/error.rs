//! Error types for the loading, configuration and generation boundaries.
//!
//! Query handling itself never fails: insufficient input, empty retrieval and
//! unknown comparison pairs are rendered as guidance text by their handlers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftziError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Document generation failed: {0}")]
    Generation(String),

    #[error("Document generation timed out after {0}s")]
    GenerationTimeout(u64),
}

pub type Result<T> = std::result::Result<T, DraftziError>;

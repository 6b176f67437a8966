//! Document generation seam.
//!
//! Generating a document body is delegated to an external model. Everything
//! that calls out goes through `generate_with_timeout`, the only place in the
//! pipeline with unbounded external latency.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::error::DraftziError;

#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    /// Produce a document body for the request text.
    async fn generate(&self, request: &str) -> Result<String>;
}

/// Call the generator, bounding the wait by `timeout`.
pub async fn generate_with_timeout(
    generator: &dyn DocumentGenerator,
    request: &str,
    timeout: Duration,
) -> std::result::Result<String, DraftziError> {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, request = %request, "[Generation] Generator failed");
            Err(DraftziError::Generation(e.to_string()))
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                request = %request,
                "[Generation] Generator timed out"
            );
            Err(DraftziError::GenerationTimeout(timeout.as_secs()))
        }
    }
}

/// Deterministic outline generator used when no model is attached.
///
/// Produces the standard section skeleton every legal template shares, headed
/// by the request text.
#[derive(Debug, Clone, Default)]
pub struct OutlineGenerator;

pub const STANDARD_SECTIONS: &[&str] = &[
    "Definitions and Interpretation",
    "Core Obligations and Responsibilities",
    "Term and Termination",
    "Confidentiality and Data Protection",
    "Liability and Indemnification",
    "Dispute Resolution and Governing Law",
    "General Provisions",
];

#[async_trait]
impl DocumentGenerator for OutlineGenerator {
    async fn generate(&self, request: &str) -> Result<String> {
        let mut body = format!("**LEGAL DOCUMENT: {}**\n\nKEY SECTIONS:\n", request.to_uppercase());
        for (i, section) in STANDARD_SECTIONS.iter().enumerate() {
            body.push_str(&format!("{}. {}\n", i + 1, section));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl DocumentGenerator for Failing {
        async fn generate(&self, _request: &str) -> Result<String> {
            anyhow::bail!("model offline")
        }
    }

    struct Slow;

    #[async_trait]
    impl DocumentGenerator for Slow {
        async fn generate(&self, _request: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_outline_generator() {
        let body = OutlineGenerator.generate("mutual nda").await.unwrap();
        assert!(body.starts_with("**LEGAL DOCUMENT: MUTUAL NDA**"));
        assert!(body.contains("3. Term and Termination"));
    }

    #[tokio::test]
    async fn test_generator_error_is_typed() {
        let err = generate_with_timeout(&Failing, "x", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DraftziError::Generation(ref m) if m == "model offline"));
    }

    #[tokio::test]
    async fn test_generator_timeout() {
        let err = generate_with_timeout(&Slow, "x", Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, DraftziError::GenerationTimeout(_)));
    }
}

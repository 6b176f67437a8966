//! Legal request dispatcher.
//!
//! Classifies each request and hands it to the matching handler. Every
//! handler returns displayable text; nothing here fails on user input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::calc::LegalCalculator;
use crate::compare::ComparisonEngine;
use crate::config::DraftziConfig;
use crate::corpus::{load_corpus, CorpusHandle, JsonFileSource};
use crate::error::Result;
use crate::generation::{generate_with_timeout, DocumentGenerator};
use crate::routing::IntentClassifier;
use crate::search::Retriever;
use crate::types::{ComplexityTier, QueryIntent, SearchResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub id: Uuid,
    pub query: String,
    pub intent: QueryIntent,
    pub complexity: ComplexityTier,
    pub content: String,
    pub handled_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

pub struct LegalAgent {
    classifier: IntentClassifier,
    retriever: Retriever,
    calculator: LegalCalculator,
    comparison: ComparisonEngine,
    corpus: CorpusHandle,
    generator: Arc<dyn DocumentGenerator>,
    generation_timeout: Duration,
}

impl LegalAgent {
    pub fn new(config: &DraftziConfig, corpus: CorpusHandle, generator: Arc<dyn DocumentGenerator>) -> Self {
        let generation_timeout = Duration::from_secs(config.generation.timeout_secs);
        Self {
            classifier: IntentClassifier::new(),
            retriever: Retriever::new(config.search.clone()),
            calculator: LegalCalculator::new(),
            comparison: ComparisonEngine::new(generation_timeout),
            corpus,
            generator,
            generation_timeout,
        }
    }

    /// Validate `config`, load the corpus it points at and build the agent.
    pub fn from_config(config: &DraftziConfig, generator: Arc<dyn DocumentGenerator>) -> Result<Self> {
        config.validate()?;
        let source = JsonFileSource::from_config(&config.corpus);
        let loaded = load_corpus(&source)?;
        tracing::info!(model = %loaded.base_model, "[Agent] Initialized");
        Ok(Self::new(config, CorpusHandle::new(loaded.corpus), generator))
    }

    pub fn corpus(&self) -> &CorpusHandle {
        &self.corpus
    }

    pub async fn process_query(&self, query: &str) -> AgentResponse {
        let start = Instant::now();
        let intent = self.classifier.classify(query);
        let complexity = self.classifier.assess_complexity(query);

        tracing::info!(intent = %intent, complexity = %complexity, "[Agent] Routing request");

        let content = match intent {
            QueryIntent::DocumentGeneration => self.handle_document_generation(query).await,
            QueryIntent::Calculation => self.handle_calculation(query),
            QueryIntent::Comparison => self.comparison.compare(query, self.generator.as_ref()).await,
            QueryIntent::Analysis => handle_analysis(query),
            QueryIntent::GeneralQuery => self.handle_general_query(query).await,
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(elapsed_ms, "[Agent] Request handled");

        AgentResponse {
            id: Uuid::new_v4(),
            query: query.to_string(),
            intent,
            complexity,
            content,
            handled_at: Utc::now(),
            elapsed_ms,
        }
    }

    /// Ranked listing against the current corpus snapshot.
    pub fn search(&self, query: &str) -> SearchResponse {
        self.retriever.search(query, &self.corpus.snapshot())
    }

    async fn generate(&self, request: &str) -> Option<String> {
        generate_with_timeout(self.generator.as_ref(), request, self.generation_timeout)
            .await
            .ok()
    }

    async fn handle_document_generation(&self, query: &str) -> String {
        let Some(document) = self.generate(query).await else {
            return format!(
                "❌ **Document generation unavailable**\n\n\
                 Your request: \"{}\"\n\n\
                 The document service did not respond. Please try again shortly.",
                query
            );
        };

        format!(
            "⚖️ **LEGAL DOCUMENT GENERATED**\n\n\
             🎯 **Your Request**: \"{}\"\n\n\
             {}\n\n\
             📄 **Generated Document**:\n{}\n\n\
             {}\n\n\
             ✅ **Document generation complete!**",
            query,
            generation_analysis(&document),
            document,
            document_suggestions(query),
        )
    }

    fn handle_calculation(&self, query: &str) -> String {
        format!(
            "🧮 **LEGAL CALCULATION RESULT**\n\n\
             🎯 **Your Request**: \"{}\"\n\n\
             {}\n\n\
             💡 **Legal Context**: Calculations are estimates. Consult legal counsel for binding figures.",
            query,
            self.calculator.calculate(query),
        )
    }

    async fn handle_general_query(&self, query: &str) -> String {
        let related = self.retriever.search_compact(query, &self.corpus.snapshot());
        let answer = self
            .generate(query)
            .await
            .unwrap_or_else(|| related.answer.clone());

        format!(
            "💡 **General Legal Query**\n\n\
             Your question: \"{}\"\n\n\
             📚 **Response from Legal Knowledge Base**:\n{}\n\n\
             {}",
            query,
            answer,
            render_related(&related),
        )
    }
}

fn handle_analysis(query: &str) -> String {
    format!(
        "📈 **Document Analysis Request**\n\n\
         Your query: \"{}\"\n\n\
         🔎 **Analysis Features**:\n\
         - Document completeness checking\n\
         - Clause analysis and recommendations\n\
         - Compliance verification\n\
         - Risk assessment",
        query
    )
}

/// Word count and section count of a generated document.
pub fn generation_analysis(document: &str) -> String {
    let word_count = document.split_whitespace().count();
    let sections = match document.matches("SECTION").count() {
        0 => document.matches("**").count() / 2,
        n => n,
    };

    format!(
        "📊 **Generation Analysis**:\n\
         - Generated {} word document with {} main sections\n\
         - Includes standard legal structure and clauses",
        word_count, sections
    )
}

pub fn document_suggestions(query: &str) -> String {
    let mut suggestions = String::from(
        "💡 **Recommendations**:\n\n\
         1. **Review Key Details**: Check names, dates, amounts, and specific terms\n\
         2. **Jurisdiction**: Verify local legal requirements apply\n\
         3. **Customization**: Adapt clauses to your specific business context\n\
         4. **Legal Review**: Consult with legal counsel for binding agreements",
    );

    let query_lower = query.to_lowercase();
    if query_lower.contains("nda") {
        suggestions.push_str("\n• Consider confidentiality period and remedy clauses");
    } else if query_lower.contains("rental") || query_lower.contains("lease") {
        suggestions.push_str("\n• Verify security deposit and maintenance responsibilities");
    } else if query_lower.contains("employment") {
        suggestions.push_str("\n• Review non-compete and termination conditions");
    }
    suggestions
}

fn render_related(response: &SearchResponse) -> String {
    if response.is_empty() {
        return format!("🔍 {}", response.answer);
    }

    let mut out = format!(
        "🔍 **Related Templates** ({} of {} documents):\n",
        response.results.len(),
        response.total_documents
    );
    for (i, r) in response.results.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (type: {}, score: {:.2})\n",
            i + 1,
            r.name,
            r.category,
            r.score
        ));
    }
    out.push_str(&response.answer);
    out
}

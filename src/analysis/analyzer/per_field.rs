//! Field-name dispatch for analysis.

use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::analyzer::whitespace::WhitespaceAnalyzer;
use crate::analysis::policy::AnalyzerPolicy;
use crate::analysis::token::TokenStream;
use crate::engine::config::IndexConfig;
use crate::error::Result;

/// Maps field names to analyzers, with a fallback for unlisted fields.
///
/// Built once per write session; the mapping never changes while documents
/// are being added.
#[derive(Debug, Clone)]
pub struct PerFieldAnalyzer {
    default_analyzer: Arc<dyn Analyzer>,
    analyzers: AHashMap<String, Arc<dyn Analyzer>>,
}

impl PerFieldAnalyzer {
    pub fn new(default_analyzer: Arc<dyn Analyzer>) -> Self {
        PerFieldAnalyzer {
            default_analyzer,
            analyzers: AHashMap::new(),
        }
    }

    /// Build the dispatch table described by an index configuration.
    ///
    /// One analyzer instance is created per policy and shared by every field
    /// using it.
    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        let mut standard = StandardAnalyzer::new().with_max_token_length(config.max_token_length)?;
        if !config.stop_words.is_empty() {
            standard = standard.with_stop_words(&config.stop_words);
        }
        let standard: Arc<dyn Analyzer> = Arc::new(standard);
        let literal: Arc<dyn Analyzer> = Arc::new(WhitespaceAnalyzer::new());

        let pick = |policy: AnalyzerPolicy| match policy {
            AnalyzerPolicy::Standard => Arc::clone(&standard),
            AnalyzerPolicy::Literal => Arc::clone(&literal),
        };

        let mut per_field = PerFieldAnalyzer::new(pick(config.default_policy));
        for (field, policy) in &config.fields {
            per_field.add_analyzer(field.clone(), pick(*policy));
        }
        Ok(per_field)
    }

    pub fn add_analyzer(&mut self, field: impl Into<String>, analyzer: Arc<dyn Analyzer>) {
        self.analyzers.insert(field.into(), analyzer);
    }

    pub fn analyzer_for(&self, field: &str) -> &Arc<dyn Analyzer> {
        self.analyzers.get(field).unwrap_or(&self.default_analyzer)
    }

    pub fn default_analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.default_analyzer
    }

    pub fn analyze_field(&self, field: &str, text: &str) -> Result<TokenStream> {
        self.analyzer_for(field).analyze(text)
    }
}

impl Analyzer for PerFieldAnalyzer {
    /// Analyze with the default analyzer. Use [`PerFieldAnalyzer::analyze_field`]
    /// to honor field overrides.
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.default_analyzer.analyze(text)
    }

    fn name(&self) -> &'static str {
        "per_field"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_terms(analyzer: &PerFieldAnalyzer, field: &str, text: &str) -> Vec<String> {
        analyzer
            .analyze_field(field, text)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_dispatch_by_field() {
        let config = IndexConfig::builder()
            .field("titolo", AnalyzerPolicy::Literal)
            .field("contenuto", AnalyzerPolicy::Standard)
            .build();
        let analyzer = PerFieldAnalyzer::from_config(&config).unwrap();

        assert_eq!(field_terms(&analyzer, "titolo", "Caldo e Affari"), vec!["Caldo", "e", "Affari"]);
        assert_eq!(field_terms(&analyzer, "contenuto", "Caldo e Affari"), vec!["caldo", "e", "affari"]);
        assert_eq!(analyzer.analyzer_for("titolo").name(), "whitespace");
    }

    #[test]
    fn test_unlisted_field_uses_default() {
        let config = IndexConfig::builder()
            .field("titolo", AnalyzerPolicy::Literal)
            .default_policy(AnalyzerPolicy::Literal)
            .build();
        let analyzer = PerFieldAnalyzer::from_config(&config).unwrap();
        assert_eq!(field_terms(&analyzer, "autore", "Mario ROSSI"), vec!["Mario", "ROSSI"]);

        let analyzer = PerFieldAnalyzer::from_config(&IndexConfig::default()).unwrap();
        assert_eq!(field_terms(&analyzer, "autore", "Mario ROSSI"), vec!["mario", "rossi"]);
    }

    #[test]
    fn test_configured_stop_words_apply_to_standard_only() {
        let config = IndexConfig::builder()
            .field("titolo", AnalyzerPolicy::Literal)
            .stop_words(["e"])
            .build();
        let analyzer = PerFieldAnalyzer::from_config(&config).unwrap();
        assert_eq!(field_terms(&analyzer, "contenuto", "Caldo e Affari"), vec!["caldo", "affari"]);
        assert_eq!(field_terms(&analyzer, "titolo", "Caldo e Affari"), vec!["Caldo", "e", "Affari"]);
    }
}

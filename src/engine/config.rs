//! Index configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::policy::AnalyzerPolicy;
use crate::analysis::tokenizer::unicode_word::DEFAULT_MAX_TOKEN_LENGTH;
use crate::error::{LexisError, Result};
use crate::search::similarity::Bm25Similarity;

/// Configuration for one index-build session and the snapshots it produces.
///
/// Every value the index depends on is carried here explicitly. The
/// field-to-policy mapping is fixed once a session starts.
///
/// # Examples
///
/// ```
/// use lexis::{AnalyzerPolicy, IndexConfig};
///
/// let config = IndexConfig::builder()
///     .field("titolo", AnalyzerPolicy::Literal)
///     .field("contenuto", AnalyzerPolicy::Standard)
///     .build();
/// assert_eq!(config.policy_for("titolo"), AnalyzerPolicy::Literal);
/// assert_eq!(config.policy_for("autore"), AnalyzerPolicy::Standard);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Explicit analyzer policy per field name.
    pub fields: BTreeMap<String, AnalyzerPolicy>,

    /// Policy for fields without an explicit entry.
    pub default_policy: AnalyzerPolicy,

    /// Scoring parameters.
    pub similarity: Bm25Similarity,

    /// Words removed by the standard policy. Empty by default.
    pub stop_words: Vec<String>,

    /// Longest token the standard policy emits, in characters.
    pub max_token_length: usize,

    /// Run query words through the field's analyzer before lookup.
    ///
    /// Off by default: query terms are looked up exactly as given, so a
    /// capitalized word never matches a lower-cased standard field.
    pub normalize_query_terms: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            fields: BTreeMap::new(),
            default_policy: AnalyzerPolicy::Standard,
            similarity: Bm25Similarity::default(),
            stop_words: Vec::new(),
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            normalize_query_terms: false,
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Policy applied to `field`.
    pub fn policy_for(&self, field: &str) -> AnalyzerPolicy {
        self.fields
            .get(field)
            .copied()
            .unwrap_or(self.default_policy)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self.fields.keys().find(|name| !is_valid_field_name(name)) {
            return Err(LexisError::invalid_config(format!(
                "invalid field name '{name}': must be non-empty, without ':' or whitespace"
            )));
        }
        if self.max_token_length == 0 {
            return Err(LexisError::invalid_config(
                "max_token_length must be greater than zero",
            ));
        }
        self.similarity.validate()
    }
}

/// Field names appear on the left of `field:query`, so they cannot contain
/// the separator or whitespace.
pub(crate) fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(':') && !name.chars().any(char::is_whitespace)
}

#[derive(Debug, Default)]
pub struct IndexConfigBuilder {
    config: IndexConfig,
}

impl IndexConfigBuilder {
    pub fn field(mut self, name: impl Into<String>, policy: AnalyzerPolicy) -> Self {
        self.config.fields.insert(name.into(), policy);
        self
    }

    pub fn default_policy(mut self, policy: AnalyzerPolicy) -> Self {
        self.config.default_policy = policy;
        self
    }

    pub fn similarity(mut self, similarity: Bm25Similarity) -> Self {
        self.config.similarity = similarity;
        self
    }

    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_token_length(mut self, max_token_length: usize) -> Self {
        self.config.max_token_length = max_token_length;
        self
    }

    pub fn normalize_query_terms(mut self, normalize: bool) -> Self {
        self.config.normalize_query_terms = normalize;
        self
    }

    pub fn build(self) -> IndexConfig {
        self.config
    }
}

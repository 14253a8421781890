//! Named analysis policies that can be assigned to fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LexisError, Result};

/// The tokenization and normalization rule applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerPolicy {
    /// Word segmentation on whitespace and punctuation, lower-cased.
    /// Meant for content-style fields.
    #[default]
    Standard,

    /// Whitespace split, case preserved. Meant for title-style fields.
    #[serde(alias = "whitespace")]
    Literal,
}

impl AnalyzerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerPolicy::Standard => "standard",
            AnalyzerPolicy::Literal => "literal",
        }
    }

    /// Whether terms indexed under this policy are lower-cased.
    pub fn folds_case(&self) -> bool {
        matches!(self, AnalyzerPolicy::Standard)
    }
}

impl fmt::Display for AnalyzerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzerPolicy {
    type Err = LexisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(AnalyzerPolicy::Standard),
            "literal" | "whitespace" => Ok(AnalyzerPolicy::Literal),
            other => Err(LexisError::invalid_config(format!(
                "unknown analyzer policy '{other}', expected 'standard' or 'literal'"
            ))),
        }
    }
}

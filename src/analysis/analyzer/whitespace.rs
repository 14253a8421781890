//! Whitespace analyzer for title-style fields.

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::Result;

/// Splits on whitespace and keeps every token exactly as written.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceAnalyzer {
    tokenizer: WhitespaceTokenizer,
}

impl WhitespaceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Analyzer for WhitespaceAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

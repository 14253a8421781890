//! Standard analyzer for content-style fields.

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::fold_term;
use crate::analysis::token_filter::{Filter, LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// Unicode word segmentation followed by NFC + case folding and optional
/// stop-word removal.
///
/// The stop set is empty unless configured, so short function words such as
/// `il` or `e` are indexed and remain usable in phrase queries.
#[derive(Debug, Clone, Default)]
pub struct StandardAnalyzer {
    tokenizer: UnicodeWordTokenizer,
    lowercase: LowercaseFilter,
    stop: StopFilter,
}

impl StandardAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the given words after case folding. Words are folded the same
    /// way tokens are before comparison.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop = StopFilter::new(
            words
                .into_iter()
                .map(|w| fold_term(w.as_ref())),
        );
        self
    }

    pub fn with_max_token_length(mut self, max_token_length: usize) -> Result<Self> {
        self.tokenizer = UnicodeWordTokenizer::with_max_token_length(max_token_length)?;
        Ok(self)
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let tokens = self.tokenizer.tokenize(text)?;
        let tokens = self.lowercase.filter(tokens)?;
        if self.stop.is_empty() {
            Ok(tokens)
        } else {
            self.stop.filter(tokens)
        }
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

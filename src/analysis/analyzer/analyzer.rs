//! The analyzer trait.

use std::fmt::Debug;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Turns raw text into an ordered stream of normalized tokens.
///
/// Analyzers hold no state between calls and can be shared across threads.
pub trait Analyzer: Send + Sync + Debug {
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    fn name(&self) -> &'static str;

    /// Convenience wrapper returning only the term texts.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

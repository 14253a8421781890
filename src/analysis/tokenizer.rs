//! Tokenizers split raw text into positioned tokens.

pub mod unicode_word;
pub mod whitespace;

use std::fmt::Debug;

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;

/// Splits text into tokens numbered from position zero.
///
/// Implementations never emit empty tokens.
pub trait Tokenizer: Send + Sync + Debug {
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    fn name(&self) -> &'static str;
}

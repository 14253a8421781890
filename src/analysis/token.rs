//! Token representation.

/// A single token produced by a tokenizer and possibly rewritten by filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Term text after normalization.
    pub text: String,

    /// Zero-based position in the field's token stream.
    ///
    /// Filters that drop tokens keep the remaining positions untouched, so a
    /// removed token leaves a gap.
    pub position: u32,

    /// Byte offset of the token start in the original text.
    pub start_offset: usize,

    /// Byte offset one past the token end in the original text.
    pub end_offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, position: u32, start_offset: usize, end_offset: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }
}

/// A stream of tokens in emission order.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

//! Text analysis.
//!
//! Turns raw field text into the ordered stream of normalized terms that the
//! inverted index stores:
//!
//! ```text
//! Text → Tokenizer → Token Stream → Token Filters → Analyzed Tokens
//! ```
//!
//! Two analyzers back the built-in [`AnalyzerPolicy`] values:
//!
//! - [`StandardAnalyzer`]: Unicode word segmentation, NFC normalization and
//!   full lower-casing, optional stop words.
//! - [`WhitespaceAnalyzer`]: whitespace split, text kept as written.
//!
//! [`PerFieldAnalyzer`] is the field-name dispatch table used while indexing.
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! let terms: Vec<String> = analyzer
//!     .analyze("Il Direttore, ha sottolineato!")
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//! assert_eq!(terms, vec!["il", "direttore", "ha", "sottolineato"]);
//! ```

pub mod analyzer;
pub mod policy;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::analyzer::Analyzer;
pub use analyzer::per_field::PerFieldAnalyzer;
pub use analyzer::standard::StandardAnalyzer;
pub use analyzer::whitespace::WhitespaceAnalyzer;
pub use policy::AnalyzerPolicy;
pub use token::{Token, TokenStream};
pub use token_filter::Filter as TokenFilter;
pub use tokenizer::Tokenizer;
